use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::assets::decode::PremulImage;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Sequential decoded frames of a background video.
pub trait VideoFrameSource {
    /// Next frame in source order, already scaled to the canvas.
    fn next_frame(&mut self) -> AudiogramResult<PremulImage>;
}

/// Streams RGBA frames from a system `ffmpeg` process, resampled to the output rate and scaled
/// to the canvas.
pub struct FfmpegVideoSource {
    source_path: PathBuf,
    canvas: Canvas,
    child: Child,
    stdout: ChildStdout,
    frames_read: u64,
    pending: Option<PremulImage>,
}

impl FfmpegVideoSource {
    /// Spawn the decoder for `source_path` and decode the first frame, so unreadable or
    /// non-video files fail here rather than mid-render.
    #[tracing::instrument(skip_all, fields(path = %source_path.display()))]
    pub fn open(source_path: &Path, canvas: Canvas, fps: Fps) -> AudiogramResult<Self> {
        if !source_path.is_file() {
            return Err(AudiogramError::resource(format!(
                "background video '{}' not found",
                source_path.display()
            )));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(source_path)
            .args([
                "-an",
                "-vf",
                &format!("scale={}:{}", canvas.width, canvas.height),
                "-r",
                &format!("{}/{}", fps.num, fps.den),
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                AudiogramError::resource(format!("failed to spawn ffmpeg for video decode: {e}"))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AudiogramError::resource("failed to open ffmpeg stdout"))?;

        let mut source = Self {
            source_path: source_path.to_path_buf(),
            canvas,
            child,
            stdout,
            frames_read: 0,
            pending: None,
        };
        let first = source.read_frame().map_err(|e| {
            AudiogramError::resource(format!(
                "background video '{}' could not be decoded: {e}",
                source_path.display()
            ))
        })?;
        source.pending = Some(first);

        tracing::debug!(width = canvas.width, height = canvas.height, "video decoder started");
        Ok(source)
    }

    fn read_frame(&mut self) -> AudiogramResult<PremulImage> {
        let mut buf = vec![0u8; self.canvas.pixel_count() * 4];
        self.stdout.read_exact(&mut buf).map_err(|e| {
            AudiogramError::resource(format!(
                "background video '{}' exhausted after {} frames: {e}",
                self.source_path.display(),
                self.frames_read
            ))
        })?;
        self.frames_read += 1;
        PremulImage::from_straight_rgba8(self.canvas.width, self.canvas.height, buf)
    }
}

impl VideoFrameSource for FfmpegVideoSource {
    fn next_frame(&mut self) -> AudiogramResult<PremulImage> {
        match self.pending.take() {
            Some(frame) => Ok(frame),
            None => self.read_frame(),
        }
    }
}

impl Drop for FfmpegVideoSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Frames served from memory in order; used for previews and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryVideoSource {
    frames: std::collections::VecDeque<PremulImage>,
}

impl MemoryVideoSource {
    pub fn new(frames: impl IntoIterator<Item = PremulImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl VideoFrameSource for MemoryVideoSource {
    fn next_frame(&mut self) -> AudiogramResult<PremulImage> {
        self.frames
            .pop_front()
            .ok_or_else(|| AudiogramError::resource("background video exhausted"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
