//! In-memory entity cache and its derived views.
//!
//! This module provides `NeologismCache`, the mirror of the remote
//! dictionary that owns the local read path, and the pure query functions
//! that serve search, filters, "latest", and the sticky-then-random
//! "word of the moment" selection.

pub mod query;
pub mod store;

pub use query::FILTER_ALL;
pub use store::{NeologismCache, Snapshot};
