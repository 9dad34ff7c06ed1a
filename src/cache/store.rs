//! The entity cache: an in-memory mirror of the remote dictionary.
//!
//! `NeologismCache` owns the local read path. Every write goes to the remote
//! service first and the mirror is reconciled only from the service's
//! canonical response, never speculatively. Failures never cross the cache
//! boundary: each one becomes a single notification and the mirror stays at
//! its last-known-good state.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::api::EntityService;
use crate::cache::query;
use crate::models::{Category, Neologism, NeologismDraft, NeologismPatch, NeologismStatus};
use crate::notify::{Notification, Notifier};

/// The cache's current in-memory state.
///
/// `neologisms` is reverse chronological (newest first), an invariant
/// maintained by every mutating path, not just the initial load.
/// `categories` is by name as returned by the server. `latest_neologism_id`
/// is the session's sticky pointer to the most recent creation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub neologisms: Vec<Neologism>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub latest_neologism_id: Option<String>,
}

/// In-memory mirror of all neologism and category records visible to the
/// current session.
///
/// Constructed once per application lifetime with its collaborators injected,
/// so tests can build isolated instances over an in-memory service.
pub struct NeologismCache {
    service: Arc<dyn EntityService>,
    notifier: Arc<dyn Notifier>,
    auth: watch::Receiver<bool>,
    // Never held across an await: each remote call completes first, then the
    // mirror update happens in one synchronous critical section.
    state: RwLock<Snapshot>,
}

impl NeologismCache {
    pub fn new(
        service: Arc<dyn EntityService>,
        notifier: Arc<dyn Notifier>,
        auth: watch::Receiver<bool>,
    ) -> Self {
        Self {
            service,
            notifier,
            auth,
            state: RwLock::new(Snapshot::default()),
        }
    }

    // Mirror updates are plain field assignments, so a poisoned lock still
    // holds a structurally valid snapshot; recover the guard.
    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    // ===== Accessors =====

    /// Local authenticated flag, fed by the auth collaborator's watch
    /// channel.
    pub fn is_authenticated(&self) -> bool {
        *self.auth.borrow()
    }

    /// A clone of the full current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.read().clone()
    }

    /// All mirrored neologisms, newest first.
    pub fn neologisms(&self) -> Vec<Neologism> {
        self.read().neologisms.clone()
    }

    /// All mirrored categories.
    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn latest_neologism_id(&self) -> Option<String> {
        self.read().latest_neologism_id.clone()
    }

    // ===== Refresh =====

    /// Reload both collections from the remote service.
    ///
    /// The two fetches run concurrently and the snapshot is replaced only
    /// once both succeed; on any failure the previous snapshot is left
    /// untouched; no destructive partial overwrite.
    pub async fn refresh_data(&self) {
        debug!("Refreshing cache from remote service");
        self.write().loading = true;

        let (neologisms, categories) = tokio::join!(
            self.service.list_neologisms(),
            self.service.list_categories(),
        );

        match (neologisms, categories) {
            (Ok(neologisms), Ok(categories)) => {
                info!(
                    neologisms = neologisms.len(),
                    categories = categories.len(),
                    "Cache refreshed"
                );
                let mut state = self.write();
                state.neologisms = neologisms;
                state.categories = categories;
                state.loading = false;
            }
            (neologisms, categories) => {
                if let Err(ref e) = neologisms {
                    error!(error = %e, "Failed to load neologisms");
                }
                if let Err(ref e) = categories {
                    error!(error = %e, "Failed to load categories");
                }
                self.write().loading = false;
                self.notifier
                    .notify(Notification::error("Error", "Failed to load data"));
            }
        }
    }

    /// Refresh whenever the authenticated flag changes: row-level visibility
    /// may differ per identity, so login and logout both force a full reload.
    ///
    /// Takes an owned handle; pass `Arc::clone(&cache)` to keep using the
    /// cache afterwards.
    pub fn spawn_auth_refresh(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let mut rx = self.auth.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let authenticated = *rx.borrow_and_update();
                debug!(authenticated, "Authentication changed, refreshing cache");
                self.refresh_data().await;
            }
        })
    }

    // ===== Mutations =====

    /// Local authorization short-circuit. This is a UX guard only; the
    /// remote service independently re-validates identity on every write.
    fn require_auth(&self, action: &str) -> bool {
        if self.is_authenticated() {
            return true;
        }
        debug!(action, "Rejected unauthenticated mutation");
        self.notifier.notify(Notification::error(
            "Authentication Required",
            &format!("Please log in to {}", action),
        ));
        false
    }

    /// Create a neologism and prepend the canonical record to the mirror.
    pub async fn add_neologism(&self, draft: NeologismDraft) {
        if !self.require_auth("create a neologism") {
            return;
        }

        match self.service.create_neologism(&draft).await {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "Neologism created");
                {
                    let mut state = self.write();
                    state.latest_neologism_id = Some(created.id.clone());
                    // The new record is always newest, so prepending keeps
                    // the newest-first invariant without a re-sort.
                    state.neologisms.insert(0, created);
                }
                self.notifier.notify(Notification::success(
                    "Success",
                    "Neologism created successfully",
                ));
            }
            Err(e) => {
                error!(error = %e, "Failed to create neologism");
                self.notifier
                    .notify(Notification::error("Error", "Failed to create neologism"));
            }
        }
    }

    /// Create a category and append it to the mirror.
    pub async fn add_category(&self, name: &str) {
        if !self.require_auth("create a category") {
            return;
        }

        match self.service.create_category(name).await {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "Category created");
                // Appended at the end; the by-name order returned by the
                // server is restored on the next refresh.
                self.write().categories.push(created);
                self.notifier.notify(Notification::success(
                    "Success",
                    "Category created successfully",
                ));
            }
            Err(e) => {
                error!(error = %e, "Failed to create category");
                self.notifier
                    .notify(Notification::error("Error", "Failed to create category"));
            }
        }
    }

    /// Replace a mirrored record with the canonical updated one, in place.
    /// Edits never change created_at, so the entry keeps its position.
    fn apply_update(&self, updated: Neologism) {
        let mut state = self.write();
        if let Some(slot) = state.neologisms.iter_mut().find(|n| n.id == updated.id) {
            *slot = updated;
        }
    }

    /// Push a full-record edit to the remote service and reconcile.
    pub async fn update_neologism(&self, record: &Neologism) {
        if !self.require_auth("update neologisms") {
            return;
        }

        let patch = NeologismPatch::from_record(record);
        match self.service.update_neologism(&record.id, &patch).await {
            Ok(updated) => {
                info!(id = %updated.id, "Neologism updated");
                self.apply_update(updated);
                self.notifier.notify(Notification::success(
                    "Success",
                    "Neologism updated successfully",
                ));
            }
            Err(e) => {
                error!(error = %e, id = %record.id, "Failed to update neologism");
                self.notifier
                    .notify(Notification::error("Error", "Failed to update neologism"));
            }
        }
    }

    /// Workflow transition: update only the status field.
    pub async fn update_neologism_status(&self, id: &str, status: NeologismStatus) {
        if !self.require_auth("update neologisms") {
            return;
        }

        let patch = NeologismPatch::status_only(status);
        match self.service.update_neologism(id, &patch).await {
            Ok(updated) => {
                info!(id = %updated.id, status = %status, "Neologism status updated");
                self.apply_update(updated);
                self.notifier
                    .notify(Notification::success("Success", "Neologism status updated"));
            }
            Err(e) => {
                error!(error = %e, id = %id, "Failed to update neologism status");
                self.notifier.notify(Notification::error(
                    "Error",
                    "Failed to update neologism status",
                ));
            }
        }
    }

    /// Delete a record remotely, then drop it from the mirror.
    pub async fn delete_neologism(&self, id: &str) {
        if !self.require_auth("delete neologisms") {
            return;
        }

        match self.service.delete_neologism(id).await {
            Ok(()) => {
                info!(id = %id, "Neologism deleted");
                self.write().neologisms.retain(|n| n.id != id);
                self.notifier.notify(Notification::success(
                    "Success",
                    "Neologism deleted successfully",
                ));
            }
            Err(e) => {
                error!(error = %e, id = %id, "Failed to delete neologism");
                self.notifier
                    .notify(Notification::error("Error", "Failed to delete neologism"));
            }
        }
    }

    // ===== Derived views =====

    /// Case-insensitive substring search over name, definition, and root
    /// words.
    pub fn search(&self, query: &str) -> Vec<Neologism> {
        let state = self.read();
        query::search_neologisms(&state.neologisms, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filter by category id; `""` and `"all"` mean no filter.
    pub fn filter_by_category(&self, category_id: &str) -> Vec<Neologism> {
        let state = self.read();
        query::filter_by_category(&state.neologisms, category_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filter by status wire string; `""` and `"all"` mean no filter.
    pub fn filter_by_status(&self, status: &str) -> Vec<Neologism> {
        let state = self.read();
        query::filter_by_status(&state.neologisms, status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The most recently created neologism in the mirror.
    pub fn latest_neologism(&self) -> Option<Neologism> {
        query::latest_neologism(&self.read().neologisms).cloned()
    }

    /// Sticky-then-random "word of the moment" selection.
    pub fn random_neologism(&self) -> Option<Neologism> {
        let state = self.read();
        query::random_neologism(&state.neologisms, state.latest_neologism_id.as_deref()).cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================
