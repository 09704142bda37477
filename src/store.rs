//! In-memory user record collection.
//!
//! Records keep insertion order; presentation ordering lives in [`crate::view`].
//! Nothing here is persisted.
//!
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a [`User`]; unique within one [`UserStore`].
pub type UserId = u64;

/// One user record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Hands out strictly increasing ids seeded from wall-clock milliseconds.
///
/// Two calls within the same millisecond still yield distinct ids because
/// every id is at least one greater than the last one issued.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: UserId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> UserId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as UserId)
            .unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

/// Ordered collection of users held for one dashboard session.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
    ids: IdGenerator,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All records in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Append a record under a freshly generated id and return that id.
    pub fn insert(&mut self, name: String, email: String) -> UserId {
        let id = self.ids.next_id();
        self.users.push(User { id, name, email });
        id
    }

    /// Replace name and email of `id` in place. Returns `false` when absent.
    pub fn update(&mut self, id: UserId, name: String, email: String) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.name = name;
                user.email = email;
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`, if any.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let idx = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing_in_a_tight_loop() {
        let mut ids = IdGenerator::new();
        let mut prev = ids.next_id();
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!(id > prev);
            prev = id;
        }
    }

    #[test]
    fn generator_respects_starting_point() {
        let mut ids = IdGenerator { last: UserId::MAX - 1 };
        assert_eq!(ids.next_id(), UserId::MAX);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut store = UserStore::new();
        let a = store.insert("Amy".into(), "amy@x.com".into());
        let b = store.insert("Bob".into(), "bob@x.com".into());
        assert!(store.update(a, "Ann".into(), "ann@x.com".into()));
        assert_eq!(store.users()[0].id, a);
        assert_eq!(store.users()[0].name, "Ann");
        assert_eq!(store.users()[1].id, b);
        assert!(!store.update(a + b, "X".into(), "x@y.z".into()));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = UserStore::new();
        let a = store.insert("Amy".into(), "amy@x.com".into());
        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        assert!(store.is_empty());
    }
}
