//! User directory and authentication sessions.
//!
//! Registration, login, logout, and profile updates for the single active
//! user of a Taskflow instance. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The storage-backed user directory in [`directory`]
//! - Session orchestration in [`services`]

pub mod directory;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
