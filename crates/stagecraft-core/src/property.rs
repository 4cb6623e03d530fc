//! Geometric properties and the setter protocol
//!
//! Every actor exposes four numeric properties: `x`, `y`, `rotation` and
//! `scale`. An assignment is either a literal number, applied immediately, or
//! an [`Interpolation`] that takes over the property and drives it on
//! subsequent ticks until it reports completion.
//!
//! | property | literal write | read |
//! |---|---|---|
//! | `x` | horizontal position | horizontal position |
//! | `y` | vertical position | vertical position |
//! | `rotation` | sprite rotation set to the *negated* input | last value written through the channel |
//! | `scale` | both sprite scale factors set to the input | horizontal scale factor only |
//!
//! The rotation read does not undo the negation, so a write of `30` reads back
//! as `30` while the sprite stores `-30`.

use crate::error::{Error, Result};
use crate::identity::ActorId;
use crate::sprite::Sprite;
use crate::time::FrameTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the geometric properties of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Horizontal position
    X,
    /// Vertical position
    Y,
    /// Rotation in degrees
    Rotation,
    /// Uniform scale factor (1 is natural size)
    Scale,
}

impl Property {
    /// All properties, in channel order
    pub const ALL: [Property; 4] = [
        Property::X,
        Property::Y,
        Property::Rotation,
        Property::Scale,
    ];

    /// The name used to address this property dynamically
    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Rotation => "rotation",
            Property::Scale => "scale",
        }
    }

    fn index(&self) -> usize {
        match self {
            Property::X => 0,
            Property::Y => 1,
            Property::Rotation => 2,
            Property::Scale => 3,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Property::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::MissingProperty(name.to_string()))
    }
}

/// Outcome of advancing an interpolation by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Write this value and keep driving the property
    Running(f64),
    /// Write this value and detach
    Finished(f64),
}

impl Step {
    /// The value produced for this frame
    pub fn value(&self) -> f64 {
        match self {
            Step::Running(v) | Step::Finished(v) => *v,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }
}

/// A value source that drives one property of one actor over time
///
/// The core calls [`apply`](Interpolation::apply) exactly once, when the
/// interpolation is assigned to a property. From the next tick on it calls
/// [`advance`](Interpolation::advance) once per frame and writes the returned
/// value through the property's literal setter, until a
/// [`Step::Finished`] is returned or another assignment supersedes it.
pub trait Interpolation: fmt::Debug {
    /// Bind this interpolation to `property` of `target`
    fn apply(&mut self, target: ActorId, property: Property);

    /// Produce the property value for the given frame
    fn advance(&mut self, time: FrameTime) -> Step;
}

/// The right-hand side of a property assignment
#[derive(Debug)]
pub enum PropertyValue {
    /// A number applied immediately
    Literal(f64),
    /// A value source that takes over the property
    Interpolated(Box<dyn Interpolation>),
}

impl PropertyValue {
    /// Wrap an interpolation for assignment
    pub fn interpolated(interpolation: impl Interpolation + 'static) -> Self {
        PropertyValue::Interpolated(Box::new(interpolation))
    }

    /// Check whether this assignment hands the property to an interpolation
    pub fn is_interpolation(&self) -> bool {
        matches!(self, PropertyValue::Interpolated(_))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Literal(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Literal(v as f64)
    }
}

impl From<Box<dyn Interpolation>> for PropertyValue {
    fn from(interpolation: Box<dyn Interpolation>) -> Self {
        PropertyValue::Interpolated(interpolation)
    }
}

#[derive(Debug, Default)]
struct Channel {
    /// Last literal written through this channel
    value: f64,
    driver: Option<Box<dyn Interpolation>>,
}

/// The four property channels of one actor
#[derive(Debug)]
pub struct Channels {
    channels: [Channel; 4],
}

impl Channels {
    /// Channels for an untransformed sprite
    pub fn new() -> Self {
        let mut channels: [Channel; 4] = Default::default();
        channels[Property::Scale.index()].value = 1.0;
        Self { channels }
    }

    /// Assign `value` to `property`
    ///
    /// Any interpolation already driving the property is dropped first.
    pub fn set(
        &mut self,
        target: ActorId,
        sprite: &mut Sprite,
        property: Property,
        value: PropertyValue,
    ) {
        let channel = &mut self.channels[property.index()];
        if channel.driver.take().is_some() {
            log::debug!("{} {}: previous interpolation superseded", target, property);
        }

        match value {
            PropertyValue::Literal(v) => write_literal(channel, sprite, property, v),
            PropertyValue::Interpolated(mut driver) => {
                driver.apply(target, property);
                channel.driver = Some(driver);
            }
        }
    }

    /// Read the current numeric value of `property`
    pub fn get(&self, sprite: &Sprite, property: Property) -> f64 {
        match property {
            Property::X => sprite.position().0,
            Property::Y => sprite.position().1,
            Property::Rotation => self.channels[property.index()].value,
            // horizontal and vertical factors are assumed equal
            Property::Scale => sprite.scale().0,
        }
    }

    /// Check whether an interpolation currently drives `property`
    pub fn is_driven(&self, property: Property) -> bool {
        self.channels[property.index()].driver.is_some()
    }

    /// Advance every attached interpolation by one frame
    ///
    /// Returns the number of interpolations still attached afterwards.
    pub fn advance(&mut self, sprite: &mut Sprite, time: FrameTime) -> usize {
        let mut running = 0;
        for property in Property::ALL {
            let channel = &mut self.channels[property.index()];
            let Some(driver) = channel.driver.as_mut() else {
                continue;
            };

            let step = driver.advance(time);
            if step.is_finished() {
                channel.driver = None;
            } else {
                running += 1;
            }
            write_literal(channel, sprite, property, step.value());
        }
        running
    }

    /// Drop every attached interpolation, returning how many there were
    pub fn detach_all(&mut self) -> usize {
        self.channels
            .iter_mut()
            .filter_map(|channel| channel.driver.take())
            .count()
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

fn write_literal(channel: &mut Channel, sprite: &mut Sprite, property: Property, v: f64) {
    channel.value = v;
    match property {
        Property::X => sprite.set_x(v),
        Property::Y => sprite.set_y(v),
        // screen convention inverts the visible rotation
        Property::Rotation => sprite.set_rotation(-v),
        Property::Scale => sprite.set_scale(v, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Ramps by a fixed step each frame, finishing after `frames`
    #[derive(Debug)]
    struct Ramp {
        bound: Rc<RefCell<Vec<(ActorId, Property)>>>,
        value: f64,
        step: f64,
        frames: u32,
    }

    impl Ramp {
        fn new(step: f64, frames: u32) -> (Self, Rc<RefCell<Vec<(ActorId, Property)>>>) {
            let bound = Rc::new(RefCell::new(Vec::new()));
            let ramp = Ramp {
                bound: bound.clone(),
                value: 0.0,
                step,
                frames,
            };
            (ramp, bound)
        }
    }

    impl Interpolation for Ramp {
        fn apply(&mut self, target: ActorId, property: Property) {
            self.bound.borrow_mut().push((target, property));
        }

        fn advance(&mut self, _time: FrameTime) -> Step {
            self.value += self.step;
            self.frames = self.frames.saturating_sub(1);
            if self.frames == 0 {
                Step::Finished(self.value)
            } else {
                Step::Running(self.value)
            }
        }
    }

    fn frame(n: u64) -> FrameTime {
        FrameTime {
            frame: n,
            delta_seconds: 1.0 / 60.0,
        }
    }

    #[test]
    fn test_property_names() {
        assert_eq!("x".parse::<Property>().unwrap(), Property::X);
        assert_eq!("rotation".parse::<Property>().unwrap(), Property::Rotation);
        assert_eq!(Property::Scale.to_string(), "scale");

        let err = "opacity".parse::<Property>().unwrap_err();
        assert!(matches!(err, Error::MissingProperty(name) if name == "opacity"));
    }

    #[test]
    fn test_literal_scale_sets_both_axes() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let mut channels = Channels::new();

        channels.set(ActorId::new(1), &mut sprite, Property::Scale, 2.0.into());
        assert_eq!(channels.get(&sprite, Property::Scale), 2.0);
        assert_eq!(sprite.scale(), (2.0, 2.0));
    }

    #[test]
    fn test_scale_reads_horizontal_factor() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let channels = Channels::new();

        sprite.set_scale(3.0, 0.5);
        assert_eq!(channels.get(&sprite, Property::Scale), 3.0);
    }

    #[test]
    fn test_rotation_asymmetry() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let mut channels = Channels::new();

        channels.set(ActorId::new(1), &mut sprite, Property::Rotation, 30.into());
        assert_eq!(channels.get(&sprite, Property::Rotation), 30.0);
        assert_eq!(sprite.rotation(), -30.0);
    }

    #[test]
    fn test_interpolation_handoff_does_not_mutate() {
        let mut sprite = Sprite::new(10.0, 10.0);
        sprite.set_position(5.0, 5.0);
        let mut channels = Channels::new();
        let (ramp, bound) = Ramp::new(1.0, 3);

        let value = PropertyValue::interpolated(ramp);
        assert!(value.is_interpolation());
        channels.set(ActorId::new(9), &mut sprite, Property::X, value);

        assert_eq!(*bound.borrow(), vec![(ActorId::new(9), Property::X)]);
        assert_eq!(sprite.position(), (5.0, 5.0));
        assert!(channels.is_driven(Property::X));
    }

    #[test]
    fn test_advance_until_finished() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let mut channels = Channels::new();
        let (ramp, _) = Ramp::new(10.0, 2);
        channels.set(
            ActorId::new(1),
            &mut sprite,
            Property::Rotation,
            PropertyValue::interpolated(ramp),
        );

        assert_eq!(channels.advance(&mut sprite, frame(1)), 1);
        assert_eq!(channels.get(&sprite, Property::Rotation), 10.0);
        assert_eq!(sprite.rotation(), -10.0);

        assert_eq!(channels.advance(&mut sprite, frame(2)), 0);
        assert_eq!(channels.get(&sprite, Property::Rotation), 20.0);
        assert!(!channels.is_driven(Property::Rotation));

        // detached: nothing moves any more
        channels.advance(&mut sprite, frame(3));
        assert_eq!(channels.get(&sprite, Property::Rotation), 20.0);
    }

    #[test]
    fn test_literal_supersedes_interpolation() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let mut channels = Channels::new();
        let (ramp, _) = Ramp::new(1.0, 100);
        channels.set(ActorId::new(1), &mut sprite, Property::Y, PropertyValue::interpolated(ramp));

        channels.set(ActorId::new(1), &mut sprite, Property::Y, 42.0.into());
        assert!(!channels.is_driven(Property::Y));

        channels.advance(&mut sprite, frame(1));
        assert_eq!(channels.get(&sprite, Property::Y), 42.0);
    }

    #[test]
    fn test_detach_all() {
        let mut sprite = Sprite::new(10.0, 10.0);
        let mut channels = Channels::new();
        let (a, _) = Ramp::new(1.0, 10);
        let (b, _) = Ramp::new(1.0, 10);
        channels.set(ActorId::new(1), &mut sprite, Property::X, PropertyValue::interpolated(a));
        channels.set(ActorId::new(1), &mut sprite, Property::Scale, PropertyValue::interpolated(b));

        assert_eq!(channels.detach_all(), 2);
        assert!(!channels.is_driven(Property::X));
    }
}
