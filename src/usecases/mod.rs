//! Application use cases. Orchestrate domain logic via ports.

pub mod registry;
pub mod workspace;

pub use registry::{ProjectRegistry, Registry, TaskRegistry, UserRegistry};
pub use workspace::{LoadSummary, Resolved, SearchResults, Workspace};
