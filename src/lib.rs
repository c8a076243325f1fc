//! Audiogram is a frame-synthesis engine for audio-reactive videos.
//!
//! A job takes a [`SceneDescription`] and an [`AmplitudeData`] series with one amplitude vector
//! per output frame:
//!
//! - Build the static layer (images, shapes, text) once
//! - Composite each frame: background video, static layer, tracker, effects, waveform
//! - Stream the frames into a [`FrameSink`] at 30 fps, reporting progress and status
#![forbid(unsafe_code)]

pub mod assets;
pub mod effects;
pub mod encode;
pub mod foundation;
pub mod job;
pub mod plot;
pub mod render;
pub mod scene;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{AudiogramError, AudiogramResult};

pub use crate::assets::fonts::init_fonts;
pub use crate::assets::resolver::{FsResolver, MemoryResolver, ResourceResolver};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameRgb, FrameSink, InMemorySink, SinkConfig};
pub use crate::job::registry::{
    CancellationQuery, JobId, JobStatus, ProgressSink, StatusSink, TaskRegistry,
};
pub use crate::job::synth::{FrameSynthesizer, JobHooks, RenderOpts, render_job, run_job};
pub use crate::scene::amplitude::{AmplitudeData, AmplitudeSeries};
pub use crate::scene::model::SceneDescription;
