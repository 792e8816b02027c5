//! Cross-cutting configuration shared by the binary and the library.

pub mod config;
