//! Application services for authentication sessions.

mod session;

pub use session::{SessionConfig, SessionError, SessionManager, SessionResult};
