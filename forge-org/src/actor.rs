//! Authenticated actor
//!
//! This module defines the subject of every authorization decision: the
//! user resolved by the authentication layer. The engine never looks past
//! the actor's id, so the type stays deliberately small.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user an authorization question is asked about.
///
/// Produced by the authentication layer after session or token validation;
/// consumed by the authorization engine. Carries only the user id that
/// membership records reference.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use forge_org::Actor;
///
/// let actor = Actor::new(Uuid::now_v7());
/// let same = Actor::new(actor.id);
/// assert_eq!(actor, same);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Actor {
    /// User ID from the authentication layer
    pub id: Uuid,
}

impl Actor {
    /// Creates an actor for the given user id.
    ///
    /// # Arguments
    ///
    /// * `id` - The authenticated user's id
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl From<Uuid> for Actor {
    fn from(id: Uuid) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_from_uuid() {
        let id = Uuid::now_v7();
        let actor = Actor::from(id);
        assert_eq!(actor, Actor::new(id));
        assert_eq!(actor.id, id);
    }
}
