//! Generic in-memory entity store
//!
//! A `Store` holds every saved entity of one kind for the lifetime of the
//! process, in insertion order. The store owns the canonical copy of each
//! entity; reads hand out clones, so a caller mutating a returned value can
//! never corrupt stored state.
//!
//! Identity is assigned inside [`Store::save`] from a per-store counter
//! that only moves forward, so ids are never computed from a stale snapshot
//! and never reused after a delete.

use crate::error::{TellerError, TellerResult};

/// Contract every storable entity kind implements
pub trait Entity: Clone {
    /// The ID newtype for this kind
    type Id: Copy + Eq + From<u64> + Into<u64> + std::fmt::Display;

    /// Entity kind label used in error messages
    const KIND: &'static str;

    /// The store-assigned identity, `None` until the first save
    fn id(&self) -> Option<Self::Id>;

    /// Record the identity assigned by the store
    fn set_id(&mut self, id: Self::Id);

    /// Run every field-level check for this kind
    ///
    /// Checks are pure: value in, ok or the first failing check out.
    fn validate(&self) -> TellerResult<()>;
}

/// Ordered in-memory collection of one entity kind
#[derive(Debug)]
pub struct Store<T> {
    entries: Vec<T>,
    next_id: u64,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Entity> Store<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validated upsert keyed by id
    ///
    /// Runs the entity's field checks, assigns a fresh id when the entity
    /// has none, then inserts it at the end of the store or replaces the
    /// existing entry in place (replacement never changes ordering).
    /// Returns an isolated copy of the stored value.
    pub fn save(&mut self, mut entity: T) -> TellerResult<T> {
        entity.validate()?;

        let id = match entity.id() {
            Some(id) => {
                self.next_id = self.next_id.max(id.into() + 1);
                id
            }
            None => {
                let id = T::Id::from(self.next_id);
                self.next_id += 1;
                entity.set_id(id);
                id
            }
        };

        match self.position(id) {
            Some(index) => self.entries[index] = entity.clone(),
            None => self.entries.push(entity.clone()),
        }
        Ok(entity)
    }

    /// Point lookup by id
    ///
    /// Returns an isolated copy; absence is an expected outcome for
    /// lookups, so it is a value rather than an error.
    pub fn get(&self, id: T::Id) -> Option<T> {
        self.entries
            .iter()
            .find(|entry| entry.id() == Some(id))
            .cloned()
    }

    /// Remove the entity with the given id
    pub fn delete(&mut self, id: T::Id) -> TellerResult<()> {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                Ok(())
            }
            None => Err(TellerError::not_found(T::KIND, id.to_string())),
        }
    }

    /// Iterate the stored entities in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entities
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Money, OperationKind};

    fn client(name: &str) -> Client {
        Client::new(name)
    }

    #[test]
    fn test_save_assigns_sequential_ids_from_zero() {
        let mut store = Store::new();
        let first = store.save(client("a")).unwrap();
        let second = store.save(client("b")).unwrap();
        assert_eq!(first.id().unwrap().value(), 0);
        assert_eq!(second.id().unwrap().value(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_validates_before_inserting() {
        let mut store: Store<Client> = Store::new();
        let err = store.save(client("  ")).unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_is_an_upsert_that_preserves_position() {
        let mut store = Store::new();
        let mut first = store.save(client("a")).unwrap();
        store.save(client("b")).unwrap();

        first.apply(OperationKind::Deposit, Money::from_cents(500)).unwrap();
        let resaved = store.save(first.clone()).unwrap();
        assert_eq!(resaved, first);

        let names: Vec<_> = store.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(first.id().unwrap()).unwrap().balance(),
            Money::from_cents(500)
        );
    }

    #[test]
    fn test_get_returns_isolated_copy() {
        let mut store = Store::new();
        let saved = store.save(client("a")).unwrap();
        let id = saved.id().unwrap();

        let mut copy = store.get(id).unwrap();
        copy.name = "mutated".into();

        assert_eq!(store.get(id).unwrap().name, "a");
    }

    #[test]
    fn test_delete_then_get_is_none() {
        let mut store = Store::new();
        let saved = store.save(client("a")).unwrap();
        let id = saved.id().unwrap();

        store.delete(id).unwrap();
        assert!(store.get(id).is_none());

        let err = store.delete(id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = Store::new();
        store.save(client("a")).unwrap();
        let second = store.save(client("b")).unwrap();

        store.delete(second.id().unwrap()).unwrap();
        let third = store.save(client("c")).unwrap();
        assert_eq!(third.id().unwrap().value(), 2);
    }

    #[test]
    fn test_save_of_foreign_id_advances_the_counter() {
        let mut store = Store::new();
        let mut imported = client("a");
        imported.set_id(9.into());
        store.save(imported).unwrap();

        let next = store.save(client("b")).unwrap();
        assert_eq!(next.id().unwrap().value(), 10);
    }
}
