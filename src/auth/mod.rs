//! Authentication module for managing user sessions.
//!
//! This module provides:
//! - `Session`: token-based session persistence with expiry checks
//! - `AuthWatch`: explicit "authentication changed" broadcast the cache
//!   subscribes to
//!
//! Sessions are persisted to disk; access tokens expire on the schedule the
//! remote auth service reports at sign-in.

pub mod session;
pub mod watch;

pub use session::{Session, SessionData};
pub use watch::AuthWatch;
