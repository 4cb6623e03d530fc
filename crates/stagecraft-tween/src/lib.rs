//! Stagecraft Tween - interpolations for actor properties
//!
//! Tweens are handed to a property setter in place of a number. The stage
//! then advances them once per frame until they finish:
//!
//! ```
//! use stagecraft_core::{ActorBuilder, Capability, Property, Stage, StageConfig};
//! use stagecraft_tween::interpolate;
//!
//! #[derive(Debug)]
//! struct Hero;
//! impl Capability for Hero {}
//!
//! let mut stage = Stage::new(StageConfig::default());
//! let hero = stage.spawn(ActorBuilder::new(Hero)).unwrap();
//!
//! // grow from 1x to 5x over 7 seconds
//! stage.set(hero, Property::Scale, interpolate(1.0, 5.0, 7.0)).unwrap();
//! assert!(stage.actor(hero).unwrap().is_interpolating(Property::Scale));
//! ```

mod easing;
mod tween;

pub use easing::Easing;
pub use tween::{interpolate, interpolate_through, Tween};
