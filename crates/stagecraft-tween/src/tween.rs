//! Keyframe tweens

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use stagecraft_core::{
    ActorId, Error, FrameTime, Interpolation, Property, PropertyValue, Result, Step,
};

/// Tolerance for accumulated frame deltas reaching the full duration
const EPSILON: f64 = 1e-9;

/// Drives a property through a list of keyframe values over a duration
///
/// Keyframes are evenly spaced in time and the easing curve is applied to the
/// overall progress. A tween finishes on the frame its accumulated time
/// reaches the duration, leaving the property at the last keyframe. A tween
/// with a duration of zero or less finishes on its first frame.
///
/// Tweens can be described in RON:
///
/// ```
/// use stagecraft_tween::{Easing, Tween};
///
/// let ron = "(keyframes: [0.0, 90.0], duration: 2.0, easing: quad_out)";
/// let tween: Tween = ron::from_str(ron).unwrap();
/// assert_eq!(tween.easing(), Easing::QuadOut);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TweenDef", into = "TweenDef")]
pub struct Tween {
    keyframes: Vec<f64>,
    duration: f64,
    easing: Easing,
    elapsed: f64,
    target: Option<(ActorId, Property)>,
}

#[derive(Serialize, Deserialize)]
struct TweenDef {
    keyframes: Vec<f64>,
    duration: f64,
    #[serde(default)]
    easing: Easing,
}

impl TryFrom<TweenDef> for Tween {
    type Error = Error;

    fn try_from(def: TweenDef) -> Result<Self> {
        Ok(Tween::new(def.keyframes, def.duration)?.with_easing(def.easing))
    }
}

impl From<Tween> for TweenDef {
    fn from(tween: Tween) -> Self {
        TweenDef {
            keyframes: tween.keyframes,
            duration: tween.duration,
            easing: tween.easing,
        }
    }
}

impl Tween {
    /// Create a linear tween through `keyframes` over `duration` seconds
    ///
    /// Fails with [`Error::InvalidArgument`] for fewer than two keyframes.
    pub fn new(keyframes: Vec<f64>, duration: f64) -> Result<Self> {
        if keyframes.len() < 2 {
            return Err(Error::InvalidArgument(format!(
                "a tween needs at least 2 keyframes, got {}",
                keyframes.len()
            )));
        }
        Ok(Self {
            keyframes,
            duration,
            easing: Easing::Linear,
            elapsed: 0.0,
            target: None,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn keyframes(&self) -> &[f64] {
        &self.keyframes
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The actor and property this tween was applied to, if any
    pub fn target(&self) -> Option<(ActorId, Property)> {
        self.target
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }

    /// Value at eased progress `t`
    pub fn value_at(&self, t: f64) -> f64 {
        let segments = self.keyframes.len() - 1;
        let position = t.clamp(0.0, 1.0) * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        let fraction = position - index as f64;

        let from = self.keyframes[index];
        let to = self.keyframes[index + 1];
        from + (to - from) * fraction
    }

    fn last(&self) -> f64 {
        self.keyframes[self.keyframes.len() - 1]
    }
}

impl Interpolation for Tween {
    fn apply(&mut self, target: ActorId, property: Property) {
        log::debug!(
            "tween {:?} over {}s applied to {} {}",
            self.keyframes,
            self.duration,
            target,
            property
        );
        self.elapsed = 0.0;
        self.target = Some((target, property));
    }

    fn advance(&mut self, time: FrameTime) -> Step {
        // also catches NaN durations
        if !(self.duration > 0.0) {
            return Step::Finished(self.last());
        }

        self.elapsed += time.delta_seconds;
        let t = self.elapsed / self.duration;
        if t >= 1.0 - EPSILON {
            Step::Finished(self.last())
        } else {
            Step::Running(self.value_at(self.easing.apply(t)))
        }
    }
}

impl From<Tween> for PropertyValue {
    fn from(tween: Tween) -> Self {
        PropertyValue::interpolated(tween)
    }
}

/// Tween from `from` to `to` over `seconds`
pub fn interpolate(from: f64, to: f64, seconds: f64) -> Tween {
    Tween {
        keyframes: vec![from, to],
        duration: seconds,
        easing: Easing::Linear,
        elapsed: 0.0,
        target: None,
    }
}

/// Tween through every value of `values` over `seconds`
pub fn interpolate_through(values: impl Into<Vec<f64>>, seconds: f64) -> Result<Tween> {
    Tween::new(values.into(), seconds)
}
