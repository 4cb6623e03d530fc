//! Actors: on-screen entities with geometry and composed behavior

use crate::capability::{Capability, CapabilitySet};
use crate::error::{Error, Result};
use crate::identity::ActorId;
use crate::property::{Channels, Property, PropertyValue};
use crate::sprite::Sprite;
use crate::time::FrameTime;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an actor is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Built but not yet registered
    Constructing,
    /// Registered, updated and drawn every frame
    Live,
    /// Removed from the registry; terminal
    Killed,
}

/// Geometry half of an actor: its sprite and property channels
#[derive(Debug)]
pub struct Body {
    id: ActorId,
    sprite: Sprite,
    channels: Channels,
}

impl Body {
    pub fn new(id: ActorId, sprite: Sprite) -> Self {
        Self {
            id,
            sprite,
            channels: Channels::new(),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// Read the current value of `property`
    pub fn get(&self, property: Property) -> f64 {
        self.channels.get(&self.sprite, property)
    }

    /// Assign `property`, immediately or through an interpolation
    pub fn set(&mut self, property: Property, value: PropertyValue) {
        self.channels.set(self.id, &mut self.sprite, property, value);
    }

    /// Check whether an interpolation currently drives `property`
    pub fn is_interpolating(&self, property: Property) -> bool {
        self.channels.is_driven(property)
    }

    pub(crate) fn advance(&mut self, time: FrameTime) -> usize {
        self.channels.advance(&mut self.sprite, time)
    }

    pub(crate) fn detach_interpolations(&mut self) -> usize {
        self.channels.detach_all()
    }
}

/// A live, drawable entity
///
/// Actors are owned by the [`ActorRegistry`](crate::ActorRegistry) while
/// alive. Once killed, every property access fails with
/// [`Error::UseAfterKill`].
pub struct Actor {
    pub(crate) state: Lifecycle,
    pub(crate) body: Body,
    pub(crate) capabilities: CapabilitySet,
}

impl Actor {
    /// Build an actor around `sprite` in the `Constructing` state
    ///
    /// The pivot is set to the sprite's visual center here, once.
    pub fn new(id: ActorId, mut sprite: Sprite) -> Self {
        sprite.center_axis();
        Self {
            state: Lifecycle::Constructing,
            body: Body::new(id, sprite),
            capabilities: CapabilitySet::new(),
        }
    }

    pub fn id(&self) -> ActorId {
        self.body.id
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == Lifecycle::Live
    }

    fn ensure_not_killed(&self) -> Result<()> {
        if self.state == Lifecycle::Killed {
            Err(Error::UseAfterKill(self.id()))
        } else {
            Ok(())
        }
    }

    /// Read a property
    pub fn get(&self, property: Property) -> Result<f64> {
        self.ensure_not_killed()?;
        Ok(self.body.get(property))
    }

    /// Read a property addressed by name
    pub fn get_by_name(&self, name: &str) -> Result<f64> {
        let property = name.parse()?;
        self.get(property)
    }

    /// Assign a property
    ///
    /// A literal number is applied immediately. An interpolation has its
    /// `apply` called with this actor and property, and then drives the
    /// property on subsequent ticks.
    pub fn set(&mut self, property: Property, value: impl Into<PropertyValue>) -> Result<()> {
        self.ensure_not_killed()?;
        self.body.set(property, value.into());
        Ok(())
    }

    /// Assign a property addressed by name
    ///
    /// Unknown names fail with [`Error::MissingProperty`] before anything is
    /// touched.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let property = name.parse()?;
        self.set(property, value)
    }

    /// Check whether an interpolation currently drives `property`
    pub fn is_interpolating(&self, property: Property) -> bool {
        self.body.is_interpolating(property)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn sprite(&self) -> &Sprite {
        &self.body.sprite
    }

    /// Mutable access to the sprite
    ///
    /// Writing the scale axes independently here breaks the assumption that
    /// `scale` reads back the horizontal factor for both.
    pub fn sprite_mut(&mut self) -> Result<&mut Sprite> {
        self.ensure_not_killed()?;
        Ok(&mut self.body.sprite)
    }

    /// Borrow the composed capability of type `T`
    pub fn capability<T: Capability>(&self) -> Option<&T> {
        self.capabilities.get::<T>()
    }

    /// Mutably borrow the composed capability of type `T`
    pub fn capability_mut<T: Capability>(&mut self) -> Option<&mut T> {
        self.capabilities.get_mut::<T>()
    }

    pub fn has_capability<T: Capability>(&self) -> bool {
        self.capabilities.contains::<T>()
    }

    /// Names of the composed capabilities, oldest first
    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.names()
    }

    /// Check whether any composed capability answers `method`
    pub fn responds_to(&self, method: &str) -> bool {
        self.capabilities.responds_to(method)
    }

    pub(crate) fn advance_interpolations(&mut self, time: FrameTime) -> Result<usize> {
        self.ensure_not_killed()?;
        Ok(self.body.advance(time))
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id())
            .field("state", &self.state)
            .field("capabilities", &self.capability_names())
            .field("sprite", &self.body.sprite)
            .finish()
    }
}

/// Everything needed to spawn an actor on a stage
///
/// ```
/// use stagecraft_core::{ActorBuilder, Capability, Stage, StageConfig};
///
/// #[derive(Debug)]
/// struct Rock;
/// impl Capability for Rock {}
///
/// let mut stage = Stage::new(StageConfig::default());
/// let id = stage.spawn(ActorBuilder::new(Rock).size(32.0, 16.0)).unwrap();
/// assert_eq!(stage.actor(id).unwrap().sprite().center(), (16.0, 8.0));
/// ```
#[derive(Debug)]
pub struct ActorBuilder {
    pub(crate) base: Box<dyn Capability>,
    pub(crate) size: (f64, f64),
    pub(crate) position: Option<(f64, f64)>,
    pub(crate) image: Option<String>,
    pub(crate) args: Vec<Value>,
}

impl ActorBuilder {
    /// Start building an actor whose base behavior is `base`
    pub fn new(base: impl Capability + 'static) -> Self {
        Self::from_boxed(Box::new(base))
    }

    pub fn from_boxed(base: Box<dyn Capability>) -> Self {
        Self {
            base,
            size: (0.0, 0.0),
            position: None,
            image: None,
            args: Vec::new(),
        }
    }

    /// Visual size, used once to center the pivot
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    /// Initial position instead of the stage origin
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Image key for the renderer
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Arguments for the base capability's initializer
    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Add one initializer argument
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        Actor::new(ActorId::new(1), Sprite::new(40.0, 20.0))
    }

    #[test]
    fn test_new_actor_is_constructing_with_centered_pivot() {
        let actor = actor();
        assert_eq!(actor.state(), Lifecycle::Constructing);
        assert_eq!(actor.sprite().center(), (20.0, 10.0));
        assert_eq!(actor.get(Property::Scale).unwrap(), 1.0);
        assert_eq!(actor.get(Property::Rotation).unwrap(), 0.0);
    }

    #[test]
    fn test_set_and_get() {
        let mut actor = actor();
        actor.set(Property::X, 100.0).unwrap();
        actor.set(Property::Scale, 2.0).unwrap();
        actor.set(Property::Rotation, 30).unwrap();

        assert_eq!(actor.get(Property::X).unwrap(), 100.0);
        assert_eq!(actor.get(Property::Scale).unwrap(), 2.0);
        assert_eq!(actor.sprite().scale(), (2.0, 2.0));
        assert_eq!(actor.get(Property::Rotation).unwrap(), 30.0);
        assert_eq!(actor.sprite().rotation(), -30.0);
    }

    #[test]
    fn test_by_name() {
        let mut actor = actor();
        actor.set_by_name("y", 7.0).unwrap();
        assert_eq!(actor.get_by_name("y").unwrap(), 7.0);

        let err = actor.set_by_name("alpha", 1.0).unwrap_err();
        assert!(matches!(err, Error::MissingProperty(_)));
        assert_eq!(actor.get(Property::Y).unwrap(), 7.0);
    }

    #[test]
    fn test_killed_actor_rejects_access() {
        let mut actor = actor();
        actor.state = Lifecycle::Killed;

        assert!(matches!(
            actor.set(Property::X, 5.0),
            Err(Error::UseAfterKill(id)) if id == ActorId::new(1)
        ));
        assert!(matches!(actor.get(Property::X), Err(Error::UseAfterKill(_))));
        assert!(actor.sprite_mut().is_err());
    }

    #[test]
    fn test_resizing_keeps_pivot() {
        let mut actor = actor();
        actor.sprite_mut().unwrap().set_size(400.0, 400.0);
        assert_eq!(actor.sprite().center(), (20.0, 10.0));
    }
}
