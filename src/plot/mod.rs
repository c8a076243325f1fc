//! Waveform plotters: the curve fitter plus the ribbon and radial strategies.

pub mod curve;
pub mod radial;
pub mod ribbon;

use crate::effects::glow;
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::render::painter::Painter;
use crate::render::{FrameContext, Renders};
use crate::scene::model::{WaveformDesign, WaveformLayer, WaveformType};

/// Geometry strategy chosen for a waveform descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotStrategy {
    /// Mirrored amplitude ribbon.
    Ribbon,
    /// Radial ring around a center disc.
    Radial,
}

impl PlotStrategy {
    /// Resolve the strategy for a waveform, rejecting unsupported type/design pairs.
    pub fn select(wf: &WaveformLayer) -> AudiogramResult<Self> {
        let strategy = match (wf.kind, wf.design) {
            (_, WaveformDesign::Default) => Self::Ribbon,
            (WaveformType::Fad, WaveformDesign::SpectralFlux) => Self::Radial,
            (kind, design) => {
                return Err(AudiogramError::config(format!(
                    "waveform: design {design:?} is not supported for type {kind:?}"
                )));
            }
        };
        if !(wf.width.is_finite() && wf.width > 0.0) {
            return Err(AudiogramError::config("waveform: width must be > 0"));
        }
        if strategy == Self::Radial && (wf.fill2.is_none() || wf.fill3.is_none()) {
            return Err(AudiogramError::config(
                "waveform: spectral_flux requires fill2 and fill3",
            ));
        }
        if let Some(g) = &wf.glow
            && !(0.0..=1.0).contains(&g.opacity)
        {
            return Err(AudiogramError::config(
                "waveform: glow opacity must be within 0..=1",
            ));
        }
        Ok(strategy)
    }
}

/// Renders one waveform per frame from the series its type selects.
#[derive(Clone, Debug)]
pub struct Plotter {
    layer: WaveformLayer,
    strategy: PlotStrategy,
}

impl Plotter {
    /// Build a plotter for `layer`.
    pub fn new(layer: WaveformLayer) -> AudiogramResult<Self> {
        let strategy = PlotStrategy::select(&layer)?;
        Ok(Self { layer, strategy })
    }

    /// Chosen strategy.
    pub fn strategy(&self) -> PlotStrategy {
        self.strategy
    }

    /// Draw the waveform for one amplitude frame.
    ///
    /// `band_count` is the ribbon's bin count, fixed from frame 0 of the series.
    pub fn plot(
        &self,
        amplitudes: &[f32],
        band_count: usize,
        painter: &mut Painter<'_>,
    ) -> AudiogramResult<()> {
        let wf = &self.layer;
        match self.strategy {
            PlotStrategy::Ribbon => {
                let path = ribbon::ribbon_path(amplitudes, band_count, wf)?;
                if let Some(g) = &wf.glow {
                    glow::draw_glow(&path, g, painter)?;
                }
                painter.stroke_path(&path, 1.0, wf.fill1);
                painter.fill_path(&path, wf.fill1);
            }
            PlotStrategy::Radial => {
                let geom = radial::radial_geometry(amplitudes, wf)?;
                if let Some(g) = &wf.glow {
                    glow::draw_glow(&geom.ring, g, painter)?;
                }
                radial::draw(&geom, wf, painter)?;
            }
        }
        Ok(())
    }
}

impl Renders for Plotter {
    fn render(&mut self, frame: &FrameContext<'_>, painter: &mut Painter<'_>) -> AudiogramResult<()> {
        let series = match self.layer.kind {
            WaveformType::Sad => &frame.amplitudes.signal,
            WaveformType::Fad => &frame.amplitudes.spectrum,
        };
        let amplitudes = series.frame(frame.index)?;
        self.plot(amplitudes, series.band_count(), painter)
    }
}

/// Build the plotters for a scene's waveform, if any.
pub fn build_plotters(waveform: Option<&WaveformLayer>) -> AudiogramResult<Vec<Plotter>> {
    waveform.cloned().map(Plotter::new).into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/plot/mod.rs"]
mod tests;
