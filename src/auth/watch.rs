//! Authentication change broadcasting.
//!
//! Login and logout change which rows the remote service will return, so the
//! cache must do a full refresh whenever the authenticated flag flips. The
//! dependency is wired explicitly: the auth owner holds an `AuthWatch`, the
//! cache holds a receiver from it, and `NeologismCache::spawn_auth_refresh`
//! reacts to changes.

use tokio::sync::watch;

/// Sender side of the authenticated flag.
pub struct AuthWatch {
    tx: watch::Sender<bool>,
}

impl AuthWatch {
    pub fn new(initially_authenticated: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_authenticated);
        Self { tx }
    }

    /// Update the flag. Receivers are only woken when the value actually
    /// changes, so repeated logins do not trigger redundant refreshes.
    pub fn set_authenticated(&self, authenticated: bool) {
        self.tx.send_if_modified(|current| {
            if *current != authenticated {
                *current = authenticated;
                true
            } else {
                false
            }
        });
    }

    /// Current value of the flag.
    pub fn is_authenticated(&self) -> bool {
        *self.tx.borrow()
    }

    /// A receiver that doubles as the cache's `is_authenticated` predicate
    /// and its change subscription.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read() {
        let auth = AuthWatch::new(false);
        let rx = auth.subscribe();
        assert!(!*rx.borrow());

        auth.set_authenticated(true);
        assert!(*rx.borrow());
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_only_changes_wake_receivers() {
        let auth = AuthWatch::new(false);
        let mut rx = auth.subscribe();

        // Same value: no wakeup pending
        auth.set_authenticated(false);
        assert!(!rx.has_changed().unwrap());

        auth.set_authenticated(true);
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
    }
}
