//! Entity registry. The authoritative in-memory set of live entities of one kind.
//!
//! Entities are kept in insertion order with a hash index for O(1) id lookup.
//! Ids come from a per-registry counter that starts at 1 and never goes back.

use crate::domain::{
    DomainError, Entity, EntityId, Project, Task, TaskStatus, User, ValidationError,
};
use crate::ports::{RecordStore, TaskLookup};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub type UserRegistry = Registry<User>;
pub type ProjectRegistry = Registry<Project>;
pub type TaskRegistry = Registry<Task>;

#[derive(Debug, Clone)]
pub struct Registry<E: Entity> {
    entities: Vec<E>,
    index: HashMap<EntityId, usize>,
    next_id: EntityId,
}

impl<E: Entity> Default for Registry<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<E: Entity> Registry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Id the next successful `create` will assign.
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    /// All live entities in insertion order.
    pub fn get_all(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<&E> {
        self.index.get(&id).map(|&pos| &self.entities[pos])
    }

    pub fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut E> {
        let pos = *self.index.get(&id)?;
        Some(&mut self.entities[pos])
    }

    /// Linear scan with an arbitrary predicate, in insertion order.
    pub fn find<P>(&self, predicate: P) -> Vec<&E>
    where
        P: Fn(&E) -> bool,
    {
        self.entities.iter().filter(|&e| predicate(e)).collect()
    }

    /// Case-insensitive substring search over the entity's text fields.
    pub fn search(&self, query: &str) -> Vec<&E> {
        let needle = query.to_lowercase();
        self.find(|e| e.matches_text(&needle))
    }

    /// Drops every entity and resets the id counter to 1.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
        self.next_id = 1;
    }

    /// Builds with the next id and registers the result. A validation failure
    /// consumes no id.
    fn register<F>(&mut self, build: F) -> Result<&E, DomainError>
    where
        F: FnOnce(EntityId) -> Result<E, ValidationError>,
    {
        if self.next_id == EntityId::MAX {
            return Err(DomainError::IdsExhausted(E::KIND));
        }
        let entity = build(self.next_id)?;
        self.next_id += 1;
        let pos = self.entities.len();
        self.index.insert(entity.id(), pos);
        self.entities.push(entity);
        debug!(kind = E::KIND, id = self.entities[pos].id(), "registered");
        Ok(&self.entities[pos])
    }

    /// Insert (or replace in place) an entity under its own id, advancing the counter.
    /// The id must be below `EntityId::MAX`; `load_all` rejects anything else.
    fn restore(&mut self, entity: E) {
        let id = entity.id();
        match self.index.get(&id) {
            Some(&pos) => {
                warn!(kind = E::KIND, id, "duplicate id in stored records, keeping last");
                self.entities[pos] = entity;
            }
            None => {
                self.index.insert(id, self.entities.len());
                self.entities.push(entity);
            }
        }
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }

    /// Flat records for every entity, in insertion order.
    pub fn to_records(&self) -> Result<Vec<Value>, DomainError> {
        self.entities
            .iter()
            .map(|e| serde_json::to_value(e).map_err(|err| DomainError::Persistence(err.to_string())))
            .collect()
    }

    /// Replaces the registry's contents with the stored records.
    ///
    /// All records are decoded before anything is touched: one malformed record
    /// fails the load and leaves the current contents as they were.
    pub fn load_all(&mut self, store: &dyn RecordStore) -> Result<usize, DomainError> {
        let records = store.load(E::FILE_NAME);
        let decoded = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| -> Result<E, DomainError> {
                let entity =
                    serde_json::from_value::<E>(record).map_err(|e| DomainError::MalformedRecord {
                        kind: E::KIND,
                        index,
                        reason: e.to_string(),
                    })?;
                if entity.id() == EntityId::MAX {
                    return Err(DomainError::MalformedRecord {
                        kind: E::KIND,
                        index,
                        reason: format!("id {} is out of range", entity.id()),
                    });
                }
                Ok(entity)
            })
            .collect::<Result<Vec<E>, DomainError>>()?;

        self.clear();
        for entity in decoded {
            self.restore(entity);
        }
        info!(
            kind = E::KIND,
            count = self.len(),
            next_id = self.next_id,
            "loaded registry"
        );
        Ok(self.len())
    }

    /// Full overwrite of the kind's document.
    pub fn save_all(&self, store: &dyn RecordStore) -> Result<(), DomainError> {
        let records = self.to_records()?;
        store.save(E::FILE_NAME, &records)
    }
}

impl Registry<User> {
    pub fn create(&mut self, name: &str, email: &str) -> Result<&User, DomainError> {
        self.register(|id| User::new(id, name, email))
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&User> {
        let needle = name.to_lowercase();
        self.find(|u| u.name().to_lowercase().contains(&needle))
    }
}

impl Registry<Project> {
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
        user_id: EntityId,
    ) -> Result<&Project, DomainError> {
        self.register(|id| Project::new(id, title, description, due_date, user_id))
    }

    pub fn find_by_title(&self, title: &str) -> Vec<&Project> {
        let needle = title.to_lowercase();
        self.find(|p| p.title().to_lowercase().contains(&needle))
    }

    pub fn find_by_user(&self, user_id: EntityId) -> Vec<&Project> {
        self.find(|p| p.user_id() == user_id)
    }

    pub fn find_overdue(&self) -> Vec<&Project> {
        self.find(Project::is_overdue)
    }
}

impl Registry<Task> {
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        project_id: EntityId,
    ) -> Result<&Task, DomainError> {
        self.register(|id| Task::new(id, title, description, project_id))
    }

    pub fn find_by_project(&self, project_id: EntityId) -> Vec<&Task> {
        self.find(|t| t.project_id() == project_id)
    }

    /// Tasks `user_id` is assigned to.
    pub fn find_by_user(&self, user_id: EntityId) -> Vec<&Task> {
        self.find(|t| t.is_assigned(user_id))
    }

    pub fn find_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.find(|t| t.status() == status)
    }

    pub fn find_by_status_str(&self, status: &str) -> Result<Vec<&Task>, ValidationError> {
        let status: TaskStatus = status.parse()?;
        Ok(self.find_by_status(status))
    }
}

impl TaskLookup for Registry<Task> {
    fn task_status(&self, task_id: EntityId) -> Option<TaskStatus> {
        self.find_by_id(task_id).map(Task::status)
    }
}
