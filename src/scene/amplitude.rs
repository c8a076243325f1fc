use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Ordered per-frame amplitude vectors; one vector per output video frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AmplitudeSeries {
    frames: Vec<Vec<f32>>,
}

impl AmplitudeSeries {
    /// Wrap precomputed amplitude frames.
    pub fn new(frames: Vec<Vec<f32>>) -> Self {
        Self { frames }
    }

    /// Number of frames in the series.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the series holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Band count of the series, taken from its first frame.
    pub fn band_count(&self) -> usize {
        self.frames.first().map_or(0, Vec::len)
    }

    /// Borrow one amplitude frame.
    pub fn frame(&self, index: usize) -> AudiogramResult<&[f32]> {
        self.frames
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| AudiogramError::out_of_range("amplitude frame", index, self.len()))
    }
}

/// Checked bin lookup inside one amplitude frame.
pub fn bin(frame: &[f32], index: usize) -> AudiogramResult<f32> {
    frame
        .get(index)
        .copied()
        .ok_or_else(|| AudiogramError::out_of_range("amplitude bin", index, frame.len()))
}

/// The two parallel amplitude series consumed by a render job.
///
/// `spectrum` is frequency-domain data, `signal` time-domain data. Either may be empty when no
/// consumer needs it; when both are present their lengths must match.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AmplitudeData {
    /// Frequency-domain magnitudes.
    #[serde(default)]
    pub spectrum: AmplitudeSeries,
    /// Time-domain magnitudes.
    #[serde(default)]
    pub signal: AmplitudeSeries,
}

impl AmplitudeData {
    /// Pair both series, checking that they describe the same number of frames.
    pub fn new(spectrum: AmplitudeSeries, signal: AmplitudeSeries) -> AudiogramResult<Self> {
        let data = Self { spectrum, signal };
        data.validate()?;
        Ok(data)
    }

    /// Check the parallel-series length invariant.
    pub fn validate(&self) -> AudiogramResult<()> {
        if !self.spectrum.is_empty() && !self.signal.is_empty() && self.spectrum.len() != self.signal.len()
        {
            return Err(AudiogramError::config(format!(
                "amplitude series length mismatch: spectrum has {} frames, signal has {}",
                self.spectrum.len(),
                self.signal.len()
            )));
        }
        Ok(())
    }

    /// Total output frame count: one frame per amplitude vector.
    pub fn frame_count(&self) -> usize {
        self.spectrum.len().max(self.signal.len())
    }

    /// Parse `{ "spectrum": [[..]], "signal": [[..]] }`.
    pub fn from_json(json: &str) -> AudiogramResult<Self> {
        let data: Self = serde_json::from_str(json)
            .map_err(|e| AudiogramError::config(format!("amplitude json: {e}")))?;
        data.validate()?;
        Ok(data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/amplitude.rs"]
mod tests;
