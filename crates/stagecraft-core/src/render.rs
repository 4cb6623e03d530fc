//! Drawing boundary
//!
//! The stage does not draw anything itself. Each frame it hands a read-only
//! view of every visible live actor, in draw order, to a [`Renderer`].

use crate::actor::Actor;
use crate::identity::ActorId;
use crate::time::Frame;

/// Read-only view of an actor for drawing
#[derive(Debug, Clone, Copy)]
pub struct ActorView<'a> {
    actor: &'a Actor,
}

impl<'a> ActorView<'a> {
    pub(crate) fn new(actor: &'a Actor) -> Self {
        Self { actor }
    }

    pub fn id(&self) -> ActorId {
        self.actor.id()
    }

    pub fn image(&self) -> Option<&'a str> {
        self.actor.sprite().image()
    }

    pub fn position(&self) -> (f64, f64) {
        self.actor.sprite().position()
    }

    /// Rotation in sprite (clockwise-negative) degrees
    pub fn rotation(&self) -> f64 {
        self.actor.sprite().rotation()
    }

    pub fn scale(&self) -> (f64, f64) {
        self.actor.sprite().scale()
    }

    /// Pivot the sprite rotates and scales around
    pub fn center(&self) -> (f64, f64) {
        self.actor.sprite().center()
    }

    pub fn size(&self) -> (f64, f64) {
        self.actor.sprite().size()
    }

    /// The full actor, for renderers that need capability state
    pub fn actor(&self) -> &'a Actor {
        self.actor
    }
}

/// A drawing backend
pub trait Renderer {
    /// Called once before any actor of `frame` is drawn
    fn begin_frame(&mut self, _frame: Frame) {}

    /// Draw one actor
    fn draw(&mut self, actor: ActorView<'_>);

    /// Called once after every actor of the frame was drawn
    fn end_frame(&mut self) {}
}
