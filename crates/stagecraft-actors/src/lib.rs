//! Stagecraft Actors - stock actor kinds and mixins
//!
//! - `Monkey` - a face that smiles and shouts
//! - `Text` - a text label with color and font size
//! - `Banana` - a spinning projectile under gravity
//! - `Speech` - a capability that lets any actor say things
//!
//! Each kind is a [`Capability`](stagecraft_core::Capability) used as the base
//! of an actor and comes with a `builder` preset:
//!
//! ```
//! use stagecraft_actors::{Monkey, Speech};
//! use stagecraft_core::{Stage, StageConfig, Value};
//!
//! let mut stage = Stage::new(StageConfig::default());
//! let monkey = stage.spawn(Monkey::builder()).unwrap();
//! stage.compose::<Speech>(monkey, &[]).unwrap();
//! stage.invoke(monkey, "say", &[Value::from("Es mi turno!")]).unwrap();
//! assert_eq!(stage.live_actors().count(), 2);
//! ```

mod banana;
mod monkey;
mod speech;
mod text;

pub use banana::Banana;
pub use monkey::{Monkey, Mood};
pub use speech::Speech;
pub use text::{Color, Text, BLACK};
