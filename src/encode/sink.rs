use crate::foundation::core::{Fps, Rgba8};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::foundation::math::mul_div255_u16;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// One opaque RGB24 frame, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// Black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Overwrite with premultiplied RGBA8 flattened over an opaque `bg`.
    pub fn flatten_from_premul(&mut self, src_premul: &[u8], bg: Rgba8) -> AudiogramResult<()> {
        if src_premul.len() / 4 != self.data.len() / 3 || !src_premul.len().is_multiple_of(4) {
            return Err(AudiogramError::encoding(format!(
                "frame size mismatch: {} rgba bytes for a {}x{} rgb frame",
                src_premul.len(),
                self.width,
                self.height
            )));
        }

        let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
        for (d, s) in self.data.chunks_exact_mut(3).zip(src_premul.chunks_exact(4)) {
            let a = u16::from(s[3]);
            if a == 255 {
                d.copy_from_slice(&s[..3]);
                continue;
            }
            let inv = 255 - a;
            for c in 0..3 {
                d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
            }
        }
        Ok(())
    }
}

/// Consumer of encoded output.
///
/// Ordering contract: `encode_frame` is called with strictly increasing timestamps; sinks
/// reject anything else with [`AudiogramError::Encoding`]. The frame is borrowed for the call
/// only.
pub trait FrameSink: Send {
    /// Called once before any frame.
    fn begin(&mut self, cfg: SinkConfig) -> AudiogramResult<()>;
    /// Encode one frame at `pts_nanos`.
    fn encode_frame(&mut self, frame: &FrameRgb, pts_nanos: u64) -> AudiogramResult<()>;
    /// Finish the stream.
    fn close(&mut self) -> AudiogramResult<()>;
    /// Flush buffered output.
    fn flush(&mut self) -> AudiogramResult<()>;
    /// Drop the stream without finalizing any partial output.
    fn abort(&mut self);
}

/// Reject a timestamp that does not move strictly forward.
pub(crate) fn check_increasing(last: &mut Option<u64>, pts_nanos: u64) -> AudiogramResult<()> {
    if let Some(prev) = *last
        && pts_nanos <= prev
    {
        return Err(AudiogramError::encoding(format!(
            "timestamp {pts_nanos}ns does not follow {prev}ns"
        )));
    }
    *last = Some(pts_nanos);
    Ok(())
}

/// In-memory sink for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRgb)>,
    last_pts: Option<u64>,
    close_calls: usize,
    flush_calls: usize,
    abort_calls: usize,
    fail_at: Option<usize>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `n`-th (0-based) frame with an encoding error.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    /// Configuration captured by `begin`.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Accepted frames with their timestamps.
    pub fn frames(&self) -> &[(u64, FrameRgb)] {
        &self.frames
    }

    /// Accepted timestamps in call order.
    pub fn timestamps(&self) -> Vec<u64> {
        self.frames.iter().map(|(t, _)| *t).collect()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    pub fn flush_calls(&self) -> usize {
        self.flush_calls
    }

    pub fn abort_calls(&self) -> usize {
        self.abort_calls
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AudiogramResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.last_pts = None;
        Ok(())
    }

    fn encode_frame(&mut self, frame: &FrameRgb, pts_nanos: u64) -> AudiogramResult<()> {
        if self.fail_at == Some(self.frames.len()) {
            return Err(AudiogramError::encoding("sink rejected frame"));
        }
        check_increasing(&mut self.last_pts, pts_nanos)?;
        self.frames.push((pts_nanos, frame.clone()));
        Ok(())
    }

    fn close(&mut self) -> AudiogramResult<()> {
        self.close_calls += 1;
        Ok(())
    }

    fn flush(&mut self) -> AudiogramResult<()> {
        self.flush_calls += 1;
        Ok(())
    }

    fn abort(&mut self) {
        self.abort_calls += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
