//! Domain model for user accounts.
//!
//! Users are identified by an opaque id and a case-insensitively unique
//! email. Credentials are held only as salted hashes.

mod credential;
mod email;
mod error;
mod ids;
mod user;

pub use credential::CredentialHash;
pub use email::Email;
pub use error::AccountDomainError;
pub use ids::UserId;
pub use user::{User, UserRecord, UserUpdate};
