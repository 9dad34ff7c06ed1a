//! lexicache - client-side entity cache for a crowdsourced neologism
//! dictionary.
//!
//! The crate mirrors a remote relational store (PostgREST data endpoints,
//! GoTrue auth endpoints) in local memory, gates mutations on
//! authentication, reconciles the mirror only from authoritative server
//! responses, and serves derived views (search, category/status filters,
//! "latest", and a sticky-then-random "word of the moment") without extra
//! network round-trips.
//!
//! The pieces wire together explicitly:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lexicache::api::ApiClient;
//! use lexicache::auth::AuthWatch;
//! use lexicache::cache::NeologismCache;
//! use lexicache::notify::TracingNotifier;
//!
//! # async fn run() -> Result<(), lexicache::api::ApiError> {
//! let client = ApiClient::new("https://example.supabase.co", "anon-key")?;
//! let auth = AuthWatch::new(false);
//! let cache = Arc::new(NeologismCache::new(
//!     Arc::new(client),
//!     Arc::new(TracingNotifier),
//!     auth.subscribe(),
//! ));
//!
//! let _listener = Arc::clone(&cache).spawn_auth_refresh();
//! cache.refresh_data().await;
//! let featured = cache.random_neologism();
//! # let _ = featured;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod notify;
pub mod utils;

pub use api::{ApiClient, ApiError, EntityService};
pub use auth::{AuthWatch, Session, SessionData};
pub use cache::{NeologismCache, Snapshot};
pub use config::Config;
pub use models::{Category, Neologism, NeologismDraft, NeologismStatus};
pub use notify::{Notification, Notifier, NotifyKind};
