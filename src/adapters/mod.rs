//! Infrastructure adapters. Implement outbound ports.
//!
//! JSON files on disk, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod ui;
