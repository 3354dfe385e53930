//! Task board for the signed-in user.
//!
//! Free-text tasks are classified by a language model, kept most recent
//! first, toggled between pending and completed, and persisted to the
//! owner's storage partition after every change. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
