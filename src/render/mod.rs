//! Drawing surface, static layer compositor and per-frame overlays.

pub mod painter;
pub mod shapes;
pub mod static_layer;
pub mod text;
pub mod tracker;

use crate::foundation::error::AudiogramResult;
use crate::scene::amplitude::AmplitudeData;

/// Per-frame inputs shared by every animated renderer.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// 0-based frame index, also the amplitude frame index.
    pub index: usize,
    /// Total frame count of the job.
    pub total: usize,
    /// Amplitude input of the job.
    pub amplitudes: &'a AmplitudeData,
}

impl FrameContext<'_> {
    /// Fraction of the job already played at the start of this frame, `index / total`.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.index as f64 / self.total as f64
    }
}

/// Something drawn once per output frame: a waveform plotter or an effect instance.
pub trait Renders {
    /// Draw this frame's contribution.
    fn render(&mut self, frame: &FrameContext<'_>, painter: &mut painter::Painter<'_>) -> AudiogramResult<()>;
}
