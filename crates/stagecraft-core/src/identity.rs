//! Identity types for actors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle for an actor instance
///
/// Handles are handed out by the [`ActorRegistry`](crate::ActorRegistry) in
/// increasing order and are never reused for the lifetime of that registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Create a new actor ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id() {
        let id = ActorId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "actor:42");
    }

    #[test]
    fn test_actor_id_ordering() {
        assert!(ActorId::new(1) < ActorId::new(2));
    }
}
