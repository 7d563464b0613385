use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::{FrameIndex, Rgba};
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::render::backend::FrameRGBA;
use crate::render::composite::flatten_premul_over_bg;

/// MP4 sink: flattens each frame over a background color and pipes it to the system `ffmpeg`
/// (H.264, yuv420p, no audio track).
///
/// The output file is replaced if it exists. Its parent directory must already exist.
pub struct FfmpegSink {
    out_path: PathBuf,
    background: Rgba,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink writing to `out_path`, flattening over opaque black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            background: Rgba::opaque(0, 0, 0),
            encoder: None,
            cfg: None,
            scratch: Vec::new(),
            last_idx: None,
        }
    }

    /// Flatten transparent pixels over `background` instead of black.
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Destination MP4 path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

/// Reject sizes and rates the yuv420p MP4 output cannot represent.
pub fn validate_mp4_config(cfg: &SinkConfig) -> ShorelineResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(ShorelineError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(ShorelineError::validation(
            "mp4 width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(ShorelineError::validation(format!(
            "mp4 width/height must be even for yuv420p, got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// `ffmpeg` arguments for opaque RGBA frames of `cfg` on stdin, encoded to `out`.
pub(crate) fn encode_args(cfg: &SinkConfig, out: &Path) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
    let mut args: Vec<OsString> = Vec::new();
    let mut push = |items: &[&str]| args.extend(items.iter().map(OsString::from));
    push(&["-y", "-loglevel", "error"]);
    push(&["-f", "rawvideo", "-pix_fmt", "rgba", "-s", size.as_str()]);
    // rawvideo input takes its rate from `-r` before `-i`
    push(&["-r", rate.as_str(), "-i", "pipe:0"]);
    push(&["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]);
    args.push(out.as_os_str().to_owned());
    args
}

/// A running `ffmpeg` child with its stderr collected on a helper thread.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(args: &[OsString]) -> ShorelineResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ShorelineError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut bytes = Vec::new();
                pipe.read_to_end(&mut bytes)?;
                Ok(bytes)
            })
        });
        if stdin.is_none() || stderr.is_none() {
            let _ = child.kill();
            return Err(ShorelineError::encode("ffmpeg pipes were not opened"));
        }
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> ShorelineResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ShorelineError::encode("ffmpeg stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| ShorelineError::encode(format!("failed to write frame to ffmpeg: {e}")))
    }

    fn finish(mut self) -> ShorelineResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| ShorelineError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = match self.stderr.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ShorelineError::encode("ffmpeg stderr thread panicked"))?
                .map_err(|e| ShorelineError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(ShorelineError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ShorelineResult<()> {
        validate_mp4_config(&cfg)?;
        if !is_ffmpeg_on_path() {
            return Err(ShorelineError::encode(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        self.encoder = Some(Encoder::spawn(&encode_args(&cfg, &self.out_path))?);
        tracing::debug!(
            out = %self.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg started"
        );
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShorelineResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(ShorelineError::encode("mp4 sink not started"));
        };
        check_order(self.last_idx, idx, "mp4 sink")?;
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(ShorelineError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_premul_over_bg(&mut self.scratch, &frame.data, self.background.to_rgba8())?;
        encoder.write(&self.scratch)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> ShorelineResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ShorelineError::encode("mp4 sink not started"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::debug!(out = %self.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
