use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `FrameIndex` values.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ShorelineResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShorelineResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ShorelineResult<()>;
}

pub(crate) fn check_order(last: Option<FrameIndex>, idx: FrameIndex, sink: &str) -> ShorelineResult<()> {
    match last {
        Some(last) if idx.0 <= last.0 => Err(ShorelineError::encode(format!(
            "{sink} received out-of-order frame index {} after {}",
            idx.0, last.0
        ))),
        _ => Ok(()),
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames, in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ShorelineResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShorelineResult<()> {
        check_order(self.frames.last().map(|(i, _)| *i), idx, "in-memory sink")?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ShorelineResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes every frame as `<prefix><index>.png` (zero-padded to six digits) into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing `frame_000000.png`, `frame_000001.png`, … into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_prefix(dir, "frame_")
    }

    /// Sink with a custom file name prefix.
    pub fn with_prefix(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Path the frame at `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}{:06}.png", self.prefix, idx.0))
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ShorelineResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ShorelineError::validation(
                "png sequence width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ShorelineError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ShorelineResult<()> {
        check_order(self.last_idx, idx, "png sequence sink")?;
        self.last_idx = Some(idx);

        let path = self.frame_path(idx);
        frame
            .to_rgba_image()?
            .save(&path)
            .map_err(|e| ShorelineError::encode(format!("write '{}': {e}", path.display())))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ShorelineResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
