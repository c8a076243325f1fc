use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::Context as _;

use crate::encode::sink::{FrameRgb, FrameSink, SinkConfig, check_increasing};
use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Overwrite an existing output file.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Spawns the system `ffmpeg` and streams `rgb24` frames into an H.264 / yuv420p MP4.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    cfg: Option<SinkConfig>,
    last_pts: Option<u64>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_pts: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> AudiogramResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(AudiogramError::config(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(AudiogramError::config(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(AudiogramError::config(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(AudiogramError::encoding(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            AudiogramError::encoding(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AudiogramError::encoding("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| AudiogramError::encoding("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg encoder started");
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_pts = None;
        Ok(())
    }

    fn encode_frame(&mut self, frame: &FrameRgb, pts_nanos: u64) -> AudiogramResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| AudiogramError::encoding("ffmpeg sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(AudiogramError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        check_increasing(&mut self.last_pts, pts_nanos)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(AudiogramError::encoding("ffmpeg sink is already closed"));
        };
        stdin.write_all(&frame.data).map_err(|e| {
            AudiogramError::encoding(format!("failed to write frame to ffmpeg stdin: {e}"))
        })
    }

    fn close(&mut self) -> AudiogramResult<()> {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait().map_err(|e| {
            AudiogramError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| AudiogramError::encoding("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| AudiogramError::encoding(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(AudiogramError::encoding(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn flush(&mut self) -> AudiogramResult<()> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin
                .flush()
                .map_err(|e| AudiogramError::encoding(format!("failed to flush ffmpeg stdin: {e}"))),
            None => Ok(()),
        }
    }

    fn abort(&mut self) {
        if self.kill_encoder() {
            if let Err(e) = std::fs::remove_file(&self.opts.out_path) {
                tracing::debug!(error = %e, "no partial output to remove");
            }
            tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg encoder aborted");
        }
    }
}

impl FfmpegSink {
    fn kill_encoder(&mut self) -> bool {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return false;
        };
        let _ = child.kill();
        let _ = child.wait();
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        self.cfg = None;
        true
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.kill_encoder();
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> AudiogramResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory '{}'", parent.display())
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
