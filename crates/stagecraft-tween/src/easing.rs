//! Easing curves

use serde::{Deserialize, Serialize};

/// Shape of a tween's progress over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Starts slow, accelerates
    QuadIn,
    /// Starts fast, decelerates
    QuadOut,
    /// Slow at both ends
    QuadInOut,
    /// Holds the start value, jumps to the end value on completion
    Step,
}

impl Easing {
    /// Map linear progress `t` to eased progress
    ///
    /// `t` is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Step => t.floor(),
        }
    }
}
