//! Relationship lists: deduplicated, order-preserving lists of foreign ids.

use serde::{Deserialize, Serialize};

/// Identifier type shared by all entity kinds. Each kind counts from 1 on its own.
pub type EntityId = u64;

/// Foreign-id list stored on an entity (a user's projects, a project's tasks,
/// a task's assignees). Insert is a set union; remove of an absent id is a no-op.
///
/// Serialized as a plain JSON array. Repeats in stored data are dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EntityId>", into = "Vec<EntityId>")]
pub struct IdList(Vec<EntityId>);

impl IdList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless already present. Returns whether the list changed.
    pub fn insert(&mut self, id: EntityId) -> bool {
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Removes `id` if present. Returns whether the list changed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.0.iter().position(|&x| x == id) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.0
    }
}

impl FromIterator<EntityId> for IdList {
    /// Collects ids, dropping repeats.
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut list = IdList::new();
        for id in iter {
            list.insert(id);
        }
        list
    }
}

impl From<Vec<EntityId>> for IdList {
    fn from(ids: Vec<EntityId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<IdList> for Vec<EntityId> {
    fn from(list: IdList) -> Self {
        list.0
    }
}
