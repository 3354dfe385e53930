//! Durable key/value persistence for Taskflow state.
//!
//! All state lives in a flat key/value namespace of JSON blobs, mirroring
//! browser local storage. Keys are never built ad hoc: every partition is
//! named through [`StorageKey`], so the user directory, the session pointer,
//! and each user's task collection cannot collide.
//!
//! - Partition naming in [`key`]
//! - Port contracts in [`ports`]
//! - Typed JSON access in [`json`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod json;
pub mod key;
pub mod ports;

pub use json::JsonStore;
pub use key::StorageKey;
pub use ports::{KeyValueStore, StorageError, StorageResult};

#[cfg(test)]
mod tests;
