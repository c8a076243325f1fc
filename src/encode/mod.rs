//! Encoding sinks.
//!
//! Sinks consume composited frames in presentation order.

/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// Sink trait, frame buffer and the in-memory sink.
pub mod sink;
