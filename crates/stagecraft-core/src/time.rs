//! Frame-based time for the stage
//!
//! - `Frame` - Logical time unit (one tick)
//! - `Clock` - Frame counter with a fixed frame rate
//! - `FrameTime` - Snapshot handed to interpolations each tick
//! - `Delay` - How long to wait before a task runs

use serde::{Deserialize, Serialize};

/// A discrete frame number
pub type Frame = u64;

/// Stage clock state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Current frame number
    frame: Frame,
    /// Frames per second used to convert seconds to frames
    frames_per_second: u32,
}

impl Clock {
    /// Create a new clock at frame zero
    ///
    /// A frame rate of zero is clamped to one.
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            frame: 0,
            frames_per_second: frames_per_second.max(1),
        }
    }

    /// Advance to the next frame
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    /// Get the current frame
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Frames per second
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Length of one frame in seconds
    pub fn delta_seconds(&self) -> f64 {
        1.0 / self.frames_per_second as f64
    }

    /// Seconds elapsed since frame zero
    pub fn elapsed_seconds(&self) -> f64 {
        self.frame as f64 * self.delta_seconds()
    }

    /// Timing information for the current frame
    pub fn frame_time(&self) -> FrameTime {
        FrameTime {
            frame: self.frame,
            delta_seconds: self.delta_seconds(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Timing information for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// The frame being processed
    pub frame: Frame,
    /// Seconds covered by this frame
    pub delta_seconds: f64,
}

/// A delay measured on the stage clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Delay {
    /// Wait a number of frames
    Frames(u64),
    /// Wait a number of seconds
    Seconds(f64),
}

impl Delay {
    /// Delay in frames
    pub fn frames(n: u64) -> Self {
        Delay::Frames(n)
    }

    /// Delay in seconds
    pub fn seconds(s: f64) -> Self {
        Delay::Seconds(s)
    }

    /// Convert this delay to a whole number of frames
    ///
    /// Seconds round up. The result is at least one frame, so a task never
    /// runs inside the tick that scheduled it.
    pub fn to_frames(&self, frames_per_second: u32) -> u64 {
        let frames = match self {
            Delay::Frames(n) => *n,
            Delay::Seconds(s) => {
                if s.is_finite() && *s > 0.0 {
                    (s * frames_per_second.max(1) as f64).ceil() as u64
                } else {
                    0
                }
            }
        };
        frames.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        let mut clock = Clock::new(50);
        assert_eq!(clock.frame(), 0);

        clock.advance();
        clock.advance();
        assert_eq!(clock.frame(), 2);
        assert!((clock.elapsed_seconds() - 0.04).abs() < 1e-9);
        assert_eq!(clock.frame_time().frame, 2);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let clock = Clock::new(0);
        assert_eq!(clock.frames_per_second(), 1);
    }

    #[test]
    fn test_delay_to_frames() {
        assert_eq!(Delay::seconds(1.0).to_frames(60), 60);
        assert_eq!(Delay::seconds(0.01).to_frames(60), 1);
        assert_eq!(Delay::frames(5).to_frames(60), 5);
        assert_eq!(Delay::frames(0).to_frames(60), 1);
        assert_eq!(Delay::seconds(-3.0).to_frames(60), 1);
    }
}
