//! Frame synthesis: composite every output frame and stream it into a sink.

use std::sync::Arc;

use crate::assets::decode::PremulImage;
use crate::assets::media::{FfmpegVideoSource, VideoFrameSource};
use crate::assets::resolver::ResourceResolver;
use crate::effects::build_effects;
use crate::encode::sink::{FrameRgb, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::job::registry::{CancellationQuery, JobId, JobStatus, ProgressSink, StatusSink, TaskRegistry};
use crate::plot::{Plotter, build_plotters};
use crate::render::painter::{Painter, clear_pixmap, pixmap_to_premul_image};
use crate::render::shapes::DefaultShapeRenderer;
use crate::render::static_layer::{StaticLayerDeps, build_static_layer};
use crate::render::text::ParleyTextRenderer;
use crate::render::tracker::draw_tracker;
use crate::render::{FrameContext, Renders};
use crate::scene::amplitude::AmplitudeData;
use crate::scene::model::{SceneDescription, TrackerLayer, WaveformType};

/// Job-level knobs.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Opaque color under transparent pixels when flattening to RGB.
    pub background: Rgba8,
    /// Seed for particle and jitter randomness; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            seed: None,
        }
    }
}

/// External collaborators a job reports to.
#[derive(Clone, Copy)]
pub struct JobHooks<'a> {
    pub cancel: &'a dyn CancellationQuery,
    pub progress: &'a dyn ProgressSink,
    pub status: &'a dyn StatusSink,
}

impl<'a> JobHooks<'a> {
    /// Route all three hooks to one registry.
    pub fn registry(registry: &'a TaskRegistry) -> Self {
        Self {
            cancel: registry,
            progress: registry,
            status: registry,
        }
    }
}

/// Per-job state: the static layer, animated renderers and the owned frame buffer.
pub struct FrameSynthesizer<'a> {
    canvas: Canvas,
    amplitudes: &'a AmplitudeData,
    tracker: Option<TrackerLayer>,
    static_layer: Arc<vello_cpu::Pixmap>,
    video: Option<Box<dyn VideoFrameSource>>,
    effects: Vec<Box<dyn Renders>>,
    plotters: Vec<Plotter>,
    ctx: vello_cpu::RenderContext,
    buffer: vello_cpu::Pixmap,
}

impl<'a> FrameSynthesizer<'a> {
    /// Validate inputs and do all one-time work: static layer, renderers, video source.
    #[tracing::instrument(skip_all, fields(frames = amplitudes.frame_count()))]
    pub fn prepare(
        scene: &SceneDescription,
        amplitudes: &'a AmplitudeData,
        resolver: &dyn ResourceResolver,
        opts: &RenderOpts,
    ) -> AudiogramResult<Self> {
        scene.validate()?;
        amplitudes.validate()?;
        check_series(scene, amplitudes)?;

        let size = scene.video.size_u16()?;
        let mut rng = match opts.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut text = ParleyTextRenderer::default();
        let static_layer = build_static_layer(
            scene,
            StaticLayerDeps {
                resolver,
                shapes: &DefaultShapeRenderer,
                text: &mut text,
                rng: &mut rng,
            },
        )?;

        let video: Option<Box<dyn VideoFrameSource>> = match scene.video_url.as_deref() {
            Some(id) => {
                let path = resolver.local_path(id).ok_or_else(|| {
                    AudiogramError::resource(format!(
                        "background video '{id}' is not available as a local file"
                    ))
                })?;
                Some(Box::new(FfmpegVideoSource::open(
                    &path,
                    scene.video,
                    Fps::AUDIOGRAM,
                )?))
            }
            None => None,
        };

        let effect_seed = opts.seed.map(|s| s.wrapping_add(1));
        let effects = build_effects(&scene.effects, effect_seed)?;
        let plotters = build_plotters(scene.waveform.as_ref())?;
        tracing::debug!(
            effects = effects.len(),
            plotters = plotters.len(),
            video = video.is_some(),
            "frame synthesizer ready"
        );

        Ok(Self {
            canvas: scene.video,
            amplitudes,
            tracker: scene.tracker.clone(),
            static_layer,
            video,
            effects,
            plotters,
            ctx: vello_cpu::RenderContext::new(size.0, size.1),
            buffer: vello_cpu::Pixmap::new(size.0, size.1),
        })
    }

    /// Replace the background video source.
    pub fn set_video_source(&mut self, source: Option<Box<dyn VideoFrameSource>>) {
        self.video = source;
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of output frames.
    pub fn frame_count(&self) -> usize {
        self.amplitudes.frame_count()
    }

    /// Composite frame `index` into the owned buffer.
    ///
    /// Effects and video sources are stateful, so frames must be composed in order.
    pub fn compose(&mut self, index: usize) -> AudiogramResult<()> {
        let total = self.frame_count();
        if index >= total {
            return Err(AudiogramError::out_of_range("frame", index, total));
        }
        let frame = FrameContext {
            index,
            total,
            amplitudes: self.amplitudes,
        };

        self.ctx.reset();
        {
            let mut painter = Painter::new(&mut self.ctx);
            if let Some(video) = self.video.as_mut() {
                let image = video.next_frame()?;
                painter.draw_image(&image, Point::ZERO, 1.0)?;
            }
            painter.draw_pixmap(&self.static_layer, Point::ZERO, 1.0);
            if let Some(tracker) = &self.tracker {
                draw_tracker(tracker, frame.progress(), &mut painter);
            }
            for effect in &mut self.effects {
                effect.render(&frame, &mut painter)?;
            }
            for plotter in &mut self.plotters {
                plotter.render(&frame, &mut painter)?;
            }
        }
        self.ctx.flush();
        clear_pixmap(&mut self.buffer, [0; 4]);
        self.ctx.render_to_pixmap(&mut self.buffer);
        Ok(())
    }

    /// Premultiplied RGBA8 bytes of the last composed frame.
    pub fn frame_premul(&self) -> &[u8] {
        self.buffer.data_as_u8_slice()
    }

    /// Copy of the last composed frame.
    pub fn frame_image(&self) -> PremulImage {
        pixmap_to_premul_image(&self.buffer)
    }
}

/// Whole-percent progress after `done` of `total` frames.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Render one job into `sink`, reporting progress and a terminal status through `hooks`.
///
/// Setup failures report [`JobStatus::Failed`] before any sink call. An encoding failure inside
/// the loop still closes and flushes the sink, best effort; any other failure aborts the sink so
/// no partial output is finalized. Both report `Failed`.
#[tracing::instrument(skip_all, fields(job = %job, frames = amplitudes.frame_count()))]
pub fn render_job(
    job: &JobId,
    scene: &SceneDescription,
    amplitudes: &AmplitudeData,
    resolver: &dyn ResourceResolver,
    sink: &mut dyn FrameSink,
    hooks: &JobHooks<'_>,
    opts: &RenderOpts,
) -> AudiogramResult<JobStatus> {
    let synth = match FrameSynthesizer::prepare(scene, amplitudes, resolver, opts) {
        Ok(s) => s,
        Err(e) => return Err(fail(job, hooks, e)),
    };
    run_job(job, synth, sink, hooks, opts)
}

/// Drive an already prepared synthesizer through every frame into `sink`.
///
/// Same sink and status contract as [`render_job`], minus the setup step.
pub fn run_job(
    job: &JobId,
    mut synth: FrameSynthesizer<'_>,
    sink: &mut dyn FrameSink,
    hooks: &JobHooks<'_>,
    opts: &RenderOpts,
) -> AudiogramResult<JobStatus> {
    let canvas = synth.canvas();
    let cfg = SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: Fps::AUDIOGRAM,
    };
    if let Err(e) = sink.begin(cfg) {
        return Err(fail(job, hooks, e));
    }

    match run_frames(job, &mut synth, sink, hooks, opts) {
        Ok(status) => {
            let closed = sink.close();
            let flushed = sink.flush();
            if let Err(e) = closed.and(flushed) {
                return Err(fail(job, hooks, e));
            }
            hooks.status.set_status(job, status);
            tracing::info!(?status, "job done");
            Ok(status)
        }
        Err(e @ AudiogramError::Encoding(_)) => {
            if let Err(close_err) = sink.close() {
                tracing::warn!(error = %close_err, "sink close failed after encoding error");
            }
            if let Err(flush_err) = sink.flush() {
                tracing::warn!(error = %flush_err, "sink flush failed after encoding error");
            }
            Err(fail(job, hooks, e))
        }
        Err(e) => {
            sink.abort();
            Err(fail(job, hooks, e))
        }
    }
}

fn run_frames(
    job: &JobId,
    synth: &mut FrameSynthesizer<'_>,
    sink: &mut dyn FrameSink,
    hooks: &JobHooks<'_>,
    opts: &RenderOpts,
) -> AudiogramResult<JobStatus> {
    let total = synth.frame_count();
    let canvas = synth.canvas();
    let mut rgb = FrameRgb::new(canvas.width, canvas.height);
    let mut last_reported: Option<u8> = None;

    for index in 0..total {
        if !hooks.cancel.is_active(job) {
            tracing::info!(frame = index, "job cancelled");
            return Ok(JobStatus::Cancelled);
        }

        synth.compose(index)?;
        rgb.flatten_from_premul(synth.frame_premul(), opts.background)?;
        let pts = Fps::AUDIOGRAM.timestamp_nanos(FrameIndex(index as u64));
        sink.encode_frame(&rgb, pts)?;

        let percent = progress_percent(index + 1, total);
        if last_reported != Some(percent) {
            hooks.progress.set_progress(job, percent);
            tracing::info!(percent, "progress");
            last_reported = Some(percent);
        }
    }
    Ok(JobStatus::Finished)
}

fn fail(job: &JobId, hooks: &JobHooks<'_>, err: AudiogramError) -> AudiogramError {
    tracing::error!(error = %err, "job failed");
    hooks.status.set_status(job, JobStatus::Failed);
    err
}

/// A waveform needs its amplitude series whenever there are frames to render.
fn check_series(scene: &SceneDescription, amplitudes: &AmplitudeData) -> AudiogramResult<()> {
    let Some(wf) = &scene.waveform else {
        return Ok(());
    };
    let (name, series) = match wf.kind {
        WaveformType::Sad => ("signal", &amplitudes.signal),
        WaveformType::Fad => ("spectrum", &amplitudes.spectrum),
    };
    if amplitudes.frame_count() > 0 && series.is_empty() {
        return Err(AudiogramError::config(format!(
            "{:?} waveform requires {name} amplitudes",
            wf.kind
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/job/synth.rs"]
mod tests;
