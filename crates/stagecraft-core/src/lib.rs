//! Stagecraft Core - actors, capabilities and properties for 2D stages
//!
//! This crate provides the runtime half of a small 2D game framework:
//! - Actor handles, lifecycle and the ordered registry of live actors
//! - Runtime capability composition with last-composed-wins dispatch
//! - Property channels that accept numbers or interpolations
//! - Frame clock and delayed one-shot tasks
//! - A `Stage` that drives everything one tick at a time
//!
//! ## Concepts
//!
//! - `Actor` - Something on screen with a position, rotation and scale
//! - `Capability` - A unit of behavior composed into an actor at runtime
//! - `Interpolation` - A value source that drives a property over time
//! - `Task` - Work deferred by a number of frames or seconds
//! - `Renderer` - The drawing backend the stage hands its actors to
//!
//! ```
//! use stagecraft_core::{ActorBuilder, Capability, Property, Stage, StageConfig};
//!
//! #[derive(Debug)]
//! struct Rock;
//! impl Capability for Rock {}
//!
//! let mut stage = Stage::new(StageConfig::default());
//! let rock = stage.spawn(ActorBuilder::new(Rock)).unwrap();
//! stage.set(rock, Property::Rotation, 30).unwrap();
//! assert_eq!(stage.get(rock, Property::Rotation).unwrap(), 30.0);
//! ```

mod actor;
mod capability;
pub mod config;
mod error;
mod identity;
pub mod logging;
mod property;
mod registry;
pub mod render;
mod sprite;
pub mod stage;
pub mod task;
pub mod time;
mod value;

pub use actor::{Actor, ActorBuilder, Body, Lifecycle};
pub use capability::{AsAny, Capability, CapabilitySet, Composed, Ctx, UPDATE};
pub use config::StageConfig;
pub use error::{Error, Result};
pub use identity::ActorId;
pub use property::{Channels, Interpolation, Property, PropertyValue, Step};
pub use registry::{ActorRegistry, IdAllocator, LiveActors};
pub use render::{ActorView, Renderer};
pub use sprite::Sprite;
pub use stage::{Failure, Stage, TickReport};
pub use task::{FrameScheduler, Job, Task, TaskFn, TaskId, TaskScheduler};
pub use time::{Clock, Delay, Frame, FrameTime};
pub use value::Value;
