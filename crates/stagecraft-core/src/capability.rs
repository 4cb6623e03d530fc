//! Runtime capability composition
//!
//! A capability is a self-contained behavior unit (its own state, an
//! initializer and a set of named methods) that can be attached to an actor at
//! any point in its life. An actor's capabilities form an ordered list; a
//! method call walks the list from the most recently composed capability to the
//! oldest and runs the first one that provides the method, so later
//! compositions shadow earlier ones without removing them.
//!
//! The base behavior an actor is spawned with (`Monkey`, `Text`, ...) is simply
//! the first capability in that list. The per-frame update hook is the method
//! named [`UPDATE`].

use crate::actor::{ActorBuilder, Body};
use crate::error::{Error, Result};
use crate::identity::ActorId;
use crate::property::{Property, PropertyValue};
use crate::registry::IdAllocator;
use crate::sprite::Sprite;
use crate::task::{Task, TaskId, TaskScheduler};
use crate::time::{Clock, Delay, FrameTime};
use crate::value::Value;
use std::any::{Any, TypeId};
use std::fmt;

/// Name of the method the stage calls once per tick
pub const UPDATE: &str = "update";

/// Downcasting support for capability trait objects
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A behavior unit that can be composed into an actor at runtime
///
/// Implementors list the method names they answer in [`methods`] and handle
/// them in [`call`]. Both [`init`] and [`call`] run with the owning actor as
/// their subject, reachable through the [`Ctx`].
///
/// [`methods`]: Capability::methods
/// [`call`]: Capability::call
/// [`init`]: Capability::init
pub trait Capability: AsAny + fmt::Debug {
    /// Human readable name, used in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Methods this capability answers
    fn methods(&self) -> &[&'static str] {
        &[]
    }

    /// Initializer, run every time the capability is composed
    fn init(&mut self, _ctx: &mut Ctx<'_>, _args: &[Value]) -> Result<()> {
        Ok(())
    }

    /// Run one of the methods listed in [`Capability::methods`]
    fn call(&mut self, method: &str, ctx: &mut Ctx<'_>, _args: &[Value]) -> Result<Value> {
        Err(Error::UnknownMethod {
            actor: ctx.id(),
            method: method.to_string(),
        })
    }
}

/// Outcome of composing a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composed {
    /// The capability was new to the actor and has been appended
    Attached,
    /// The actor already had this capability; its initializer ran again on
    /// the existing instance
    Reattached,
}

struct Slot {
    type_id: TypeId,
    capability: Box<dyn Capability>,
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.capability, f)
    }
}

/// Ordered capabilities of one actor
#[derive(Debug, Default)]
pub struct CapabilitySet {
    slots: Vec<Slot>,
}

impl CapabilitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `capability` and run its initializer against `ctx`
    ///
    /// Composing a capability type the actor already has keeps the existing
    /// instance in its original position and runs its initializer again,
    /// which may reset state it sets up. The supplied instance is dropped.
    pub fn compose(
        &mut self,
        capability: Box<dyn Capability>,
        ctx: &mut Ctx<'_>,
        args: &[Value],
    ) -> Result<Composed> {
        let type_id = (*capability).as_any().type_id();

        let (index, composed) = match self.slots.iter().position(|s| s.type_id == type_id) {
            Some(index) => {
                log::warn!(
                    "{} already has {}; running its initializer again",
                    ctx.id(),
                    capability.name()
                );
                (index, Composed::Reattached)
            }
            None => {
                self.slots.push(Slot {
                    type_id,
                    capability,
                });
                (self.slots.len() - 1, Composed::Attached)
            }
        };

        if let Err(err) = self.slots[index].capability.init(ctx, args) {
            // a capability whose first initialization failed is not kept
            if composed == Composed::Attached {
                self.slots.pop();
            }
            return Err(err);
        }
        log::debug!("{} composed {}", ctx.id(), self.slots[index].capability.name());
        Ok(composed)
    }

    /// Index of the capability that answers `method`, newest first
    pub fn resolve(&self, method: &str) -> Option<usize> {
        self.slots
            .iter()
            .rposition(|slot| slot.capability.methods().iter().any(|m| *m == method))
    }

    /// Check whether any capability answers `method`
    pub fn responds_to(&self, method: &str) -> bool {
        self.resolve(method).is_some()
    }

    /// Call `method` on the capability that answers it
    pub fn call(&mut self, method: &str, ctx: &mut Ctx<'_>, args: &[Value]) -> Result<Value> {
        let index = self.resolve(method).ok_or_else(|| Error::UnknownMethod {
            actor: ctx.id(),
            method: method.to_string(),
        })?;
        self.slots[index].capability.call(method, ctx, args)
    }

    /// Check whether a capability of type `T` has been composed
    pub fn contains<T: Capability>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.slots.iter().any(|slot| slot.type_id == type_id)
    }

    /// Borrow the capability of type `T`
    pub fn get<T: Capability>(&self) -> Option<&T> {
        self.slots
            .iter()
            .find_map(|slot| (*slot.capability).as_any().downcast_ref::<T>())
    }

    /// Mutably borrow the capability of type `T`
    pub fn get_mut<T: Capability>(&mut self) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find_map(|slot| (*slot.capability).as_any_mut().downcast_mut::<T>())
    }

    /// Capability names, oldest first
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.capability.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Side effects on other actors requested while a capability runs
///
/// They are applied by the stage once the running call has returned.
#[derive(Debug)]
pub(crate) enum Command {
    Spawn(ActorId, ActorBuilder),
    Kill(ActorId),
}

/// What a capability sees of the world while it runs
pub struct Ctx<'a> {
    body: &'a mut Body,
    clock: &'a Clock,
    tasks: &'a mut dyn TaskScheduler,
    ids: &'a mut IdAllocator,
    commands: &'a mut Vec<Command>,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(
        body: &'a mut Body,
        clock: &'a Clock,
        tasks: &'a mut dyn TaskScheduler,
        ids: &'a mut IdAllocator,
        commands: &'a mut Vec<Command>,
    ) -> Self {
        Self {
            body,
            clock,
            tasks,
            ids,
            commands,
        }
    }

    /// The actor this call runs on
    pub fn id(&self) -> ActorId {
        self.body.id()
    }

    pub fn body(&self) -> &Body {
        self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        self.body
    }

    pub fn sprite(&self) -> &Sprite {
        self.body.sprite()
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        self.body.sprite_mut()
    }

    /// Read a property of the subject actor
    pub fn get(&self, property: Property) -> f64 {
        self.body.get(property)
    }

    /// Assign a property of the subject actor
    pub fn set(&mut self, property: Property, value: impl Into<PropertyValue>) {
        self.body.set(property, value.into());
    }

    pub fn clock(&self) -> &Clock {
        self.clock
    }

    pub fn frame_time(&self) -> FrameTime {
        self.clock.frame_time()
    }

    /// Schedule an arbitrary task
    pub fn schedule(&mut self, delay: Delay, task: Task) -> TaskId {
        self.tasks.schedule(delay, task)
    }

    /// Call `method` on the subject actor after `delay`
    pub fn after(&mut self, delay: Delay, method: &str, args: Vec<Value>) -> TaskId {
        let task = Task::invoke(self.id(), method, args);
        self.tasks.schedule(delay, task)
    }

    /// Spawn a new actor once the current call returns
    ///
    /// The handle is allocated immediately. The actor joins the registry after
    /// the call, so the tick in progress does not update it.
    pub fn spawn(&mut self, builder: ActorBuilder) -> ActorId {
        let id = self.ids.next_id();
        self.commands.push(Command::Spawn(id, builder));
        id
    }

    /// Kill another actor once the current call returns
    pub fn kill(&mut self, id: ActorId) {
        self.commands.push(Command::Kill(id));
    }

    /// Kill the subject actor once the current call returns
    pub fn kill_self(&mut self) {
        let id = self.id();
        self.kill(id);
    }
}
