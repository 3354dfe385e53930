//! Unit tests for the account domain and session manager.
