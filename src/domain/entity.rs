use super::relations::EntityId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Common surface of the three entity kinds, used by the generic registry.
///
/// Serialization must produce a flat record (scalars and arrays of scalars only)
/// and deserialization must keep the stored id and creation timestamp.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Human-readable kind, used in logs and error messages.
    const KIND: &'static str;

    /// Backing document name in the record store.
    const FILE_NAME: &'static str;

    fn id(&self) -> EntityId;

    /// Case-insensitive free-text match over the entity's text fields.
    /// `needle` is already lowercased.
    fn matches_text(&self, needle: &str) -> bool;
}

/// Case-insensitive substring check. `needle` must already be lowercase.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
