use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ShorelineError, ShorelineResult};

/// One scheduled frame: its index and the elapsed time it should be painted at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Frame index passed on to the sink.
    pub index: FrameIndex,
    /// Elapsed seconds since the animation started.
    pub time_secs: f64,
}

/// Source of frame ticks driving the paint loop.
///
/// Returning `None` ends the loop.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Deterministic fixed-rate clock: frame `n` is painted at `start + n / fps`.
#[derive(Clone, Debug)]
pub struct FixedTickScheduler {
    range: FrameRange,
    fps: Fps,
    start_secs: f64,
    next: u64,
}

impl FixedTickScheduler {
    /// Ticks for every frame of `range`; the first frame of the range is painted at `start_secs`.
    pub fn new(range: FrameRange, fps: Fps, start_secs: f64) -> ShorelineResult<Self> {
        if !start_secs.is_finite() {
            return Err(ShorelineError::validation(
                "scheduler start time must be finite",
            ));
        }
        Ok(Self {
            range,
            fps,
            start_secs,
            next: range.start.0,
        })
    }

    /// Every whole frame that fits in `duration_secs` (at least one), the first painted at
    /// `start_secs`.
    pub fn for_duration(duration_secs: f64, fps: Fps, start_secs: f64) -> ShorelineResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ShorelineError::validation(format!(
                "duration must be finite and > 0, got {duration_secs}"
            )));
        }
        let frames = fps.secs_to_frames_floor(duration_secs).max(1);
        let range = FrameRange::new(FrameIndex(0), FrameIndex(frames))?;
        Self::new(range, fps, start_secs)
    }

    /// Frames this scheduler hands out.
    pub fn range(&self) -> FrameRange {
        self.range
    }

    /// Tick rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frames not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.range.end.0.saturating_sub(self.next)
    }
}

impl FrameScheduler for FixedTickScheduler {
    fn next_frame(&mut self) -> Option<FrameTick> {
        let idx = FrameIndex(self.next);
        if !self.range.contains(idx) {
            return None;
        }
        self.next += 1;
        Some(FrameTick {
            index: idx,
            time_secs: self.start_secs + self.fps.frames_to_secs(idx.0 - self.range.start.0),
        })
    }
}

/// Counters reported by a finished render loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Frames painted, rasterized and pushed to the sink.
    pub frames_rendered: u64,
    /// Draw ops recorded across every painted frame.
    pub ops_recorded: u64,
    /// Elapsed time of the last rendered frame.
    pub last_time_secs: Option<f64>,
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
