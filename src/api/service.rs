//! Remote entity service contract.
//!
//! The cache talks to the remote store exclusively through this trait, so
//! tests can swap the HTTP client for an in-memory fake.

use async_trait::async_trait;

use crate::models::{Category, Neologism, NeologismDraft, NeologismPatch};

use super::ApiError;

/// The durable store for neologisms and categories.
///
/// All methods map to single request/response calls; any call may fail.
/// Implementations must return `list_neologisms` ordered by creation time
/// descending, with the denormalized category name populated.
#[async_trait]
pub trait EntityService: Send + Sync {
    /// All neologisms visible to the current session, newest first.
    async fn list_neologisms(&self) -> Result<Vec<Neologism>, ApiError>;

    /// A single neologism by id.
    async fn get_neologism(&self, id: &str) -> Result<Neologism, ApiError>;

    /// Create a neologism. The server assigns id and created_at and returns
    /// the canonical record.
    async fn create_neologism(&self, draft: &NeologismDraft) -> Result<Neologism, ApiError>;

    /// Apply a partial update; only supplied fields change. Returns the
    /// canonical updated record.
    async fn update_neologism(
        &self,
        id: &str,
        patch: &NeologismPatch,
    ) -> Result<Neologism, ApiError>;

    /// Delete a neologism by id.
    async fn delete_neologism(&self, id: &str) -> Result<(), ApiError>;

    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Create a category; the server assigns the id and enforces name
    /// uniqueness.
    async fn create_category(&self, name: &str) -> Result<Category, ApiError>;
}
