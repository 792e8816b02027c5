//! Core domain layer. No external I/O dependencies.
//!
//! Entities, relationship lists and validation rules live here. Dependencies flow inward.

pub mod entity;
pub mod errors;
pub mod project;
pub mod relations;
pub mod task;
pub mod user;
pub mod validation;

pub use entity::Entity;
pub use errors::{DomainError, ValidationError};
pub use project::Project;
pub use relations::{EntityId, IdList};
pub use task::{Task, TaskStatus};
pub use user::User;
