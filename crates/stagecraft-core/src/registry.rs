//! The ordered collection of live actors

use crate::actor::{Actor, Lifecycle};
use crate::error::{Error, Result};
use crate::identity::ActorId;
use indexmap::IndexMap;
use std::iter::FusedIterator;

/// Hands out actor handles in increasing order
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_id: u64,
}

impl IdAllocator {
    /// Allocate the next handle
    pub fn next_id(&mut self) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Check whether `id` was ever handed out
    pub fn has_issued(&self, id: ActorId) -> bool {
        id.raw() < self.next_id
    }

    /// Make sure `id` is never handed out again
    fn observe(&mut self, id: ActorId) {
        self.next_id = self.next_id.max(id.raw().saturating_add(1));
    }
}

/// Registry of live actors
///
/// Insertion order is draw and update order: actors registered later are
/// drawn on top of and updated after earlier ones. Membership is liveness.
#[derive(Debug, Default)]
pub struct ActorRegistry {
    /// Live actors in draw order
    actors: IndexMap<ActorId, Actor>,
    ids: IdAllocator,
}

impl ActorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for an actor about to be built
    pub fn allocate_id(&mut self) -> ActorId {
        self.ids.next_id()
    }

    /// Append `actor` to the live set and mark it live
    pub fn register(&mut self, mut actor: Actor) {
        let id = actor.id();
        self.ids.observe(id);
        actor.state = Lifecycle::Live;
        if self.actors.insert(id, actor).is_some() {
            log::warn!("{} registered twice; previous instance replaced", id);
        }
    }

    /// Remove `id` from the live set and mark it killed
    ///
    /// Fails with [`Error::NotRegistered`] if the actor is not currently live,
    /// including when it has already been removed.
    pub fn unregister(&mut self, id: ActorId) -> Result<Actor> {
        let mut actor = self
            .actors
            .shift_remove(&id)
            .ok_or(Error::NotRegistered(id))?;
        actor.state = Lifecycle::Killed;
        Ok(actor)
    }

    /// Check whether `id` is live
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Borrow a live actor, explaining why it is missing otherwise
    pub fn live(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(&id).ok_or_else(|| self.lookup_error(id))
    }

    /// Mutably borrow a live actor, explaining why it is missing otherwise
    pub fn live_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        if !self.actors.contains_key(&id) {
            return Err(self.lookup_error(id));
        }
        self.actors.get_mut(&id).ok_or(Error::NotRegistered(id))
    }

    /// Error for an access to a handle that is not live
    ///
    /// Handles this registry issued earlier belong to killed actors.
    pub fn lookup_error(&self, id: ActorId) -> Error {
        if self.ids.has_issued(id) {
            Error::UseAfterKill(id)
        } else {
            Error::NotRegistered(id)
        }
    }

    /// Lazy view of the live actors in draw order
    ///
    /// The view is `Clone`, so it can be restarted from the beginning.
    pub fn live_actors(&self) -> LiveActors<'_> {
        LiveActors {
            inner: self.actors.values(),
        }
    }

    /// Handles of the live actors in draw order, copied out
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// Move `id` to position `index` in draw order
    pub fn move_to(&mut self, id: ActorId, index: usize) -> Result<()> {
        let from = self
            .actors
            .get_index_of(&id)
            .ok_or_else(|| self.lookup_error(id))?;
        let to = index.min(self.actors.len().saturating_sub(1));
        self.actors.move_index(from, to);
        Ok(())
    }

    /// Position of `id` in draw order
    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.get_index_of(&id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Split borrow of a live actor and the handle allocator
    pub(crate) fn split_mut(&mut self, id: ActorId) -> Result<(&mut Actor, &mut IdAllocator)> {
        if !self.actors.contains_key(&id) {
            return Err(self.lookup_error(id));
        }
        let actor = self.actors.get_mut(&id).ok_or(Error::NotRegistered(id))?;
        Ok((actor, &mut self.ids))
    }

    pub(crate) fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }
}

/// Iterator over live actors in draw order
#[derive(Debug, Clone)]
pub struct LiveActors<'a> {
    inner: indexmap::map::Values<'a, ActorId, Actor>,
}

impl<'a> Iterator for LiveActors<'a> {
    type Item = &'a Actor;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for LiveActors<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for LiveActors<'_> {}

impl FusedIterator for LiveActors<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Sprite;

    fn spawn(registry: &mut ActorRegistry) -> ActorId {
        let id = registry.allocate_id();
        registry.register(Actor::new(id, Sprite::new(8.0, 8.0)));
        id
    }

    fn live_ids(registry: &ActorRegistry) -> Vec<ActorId> {
        registry.live_actors().map(|a| a.id()).collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);
        let b = spawn(&mut registry);
        let c = spawn(&mut registry);

        assert_eq!(live_ids(&registry), vec![a, b, c]);
        assert!(registry.get(a).unwrap().is_live());
    }

    #[test]
    fn test_membership_after_mixed_operations() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);
        let b = spawn(&mut registry);
        registry.unregister(a).unwrap();
        let c = spawn(&mut registry);
        let d = spawn(&mut registry);
        registry.unregister(c).unwrap();

        assert_eq!(live_ids(&registry), vec![b, d]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_double_unregister_fails() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);

        let killed = registry.unregister(a).unwrap();
        assert_eq!(killed.state(), Lifecycle::Killed);

        assert!(matches!(registry.unregister(a), Err(Error::NotRegistered(id)) if id == a));
    }

    #[test]
    fn test_lookup_error_distinguishes_killed() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);
        registry.unregister(a).unwrap();

        assert!(matches!(registry.live(a), Err(Error::UseAfterKill(_))));
        assert!(matches!(
            registry.live(ActorId::new(99)),
            Err(Error::NotRegistered(_))
        ));
    }

    #[test]
    fn test_view_is_restartable() {
        let mut registry = ActorRegistry::new();
        spawn(&mut registry);
        spawn(&mut registry);

        let view = registry.live_actors();
        assert_eq!(view.len(), 2);
        assert_eq!(view.clone().count(), 2);
        assert_eq!(view.count(), 2);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);
        registry.unregister(a).unwrap();
        let b = spawn(&mut registry);
        assert_ne!(a, b);
    }

    #[test]
    fn test_external_id_is_observed() {
        let mut registry = ActorRegistry::new();
        registry.register(Actor::new(ActorId::new(10), Sprite::default()));
        assert_eq!(registry.allocate_id(), ActorId::new(11));
    }

    #[test]
    fn test_highest_external_id() {
        let mut registry = ActorRegistry::new();
        let top = ActorId::new(u64::MAX);
        registry.register(Actor::new(top, Sprite::default()));
        assert!(registry.contains(top));
        assert_eq!(live_ids(&registry), vec![top]);
    }

    #[test]
    fn test_move_to() {
        let mut registry = ActorRegistry::new();
        let a = spawn(&mut registry);
        let b = spawn(&mut registry);
        let c = spawn(&mut registry);

        registry.move_to(a, usize::MAX).unwrap();
        assert_eq!(live_ids(&registry), vec![b, c, a]);
        registry.move_to(c, 0).unwrap();
        assert_eq!(live_ids(&registry), vec![c, b, a]);
        assert_eq!(registry.index_of(a), Some(2));
    }
}
