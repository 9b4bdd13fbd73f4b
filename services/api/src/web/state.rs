//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use axum::http::StatusCode;
use daily_fortune_core::FortuneHistoryStore;
use std::sync::{Arc, Mutex};
use tracing::error;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<FortuneHistoryStore>>,
}

impl AppState {
    pub fn new(store: FortuneHistoryStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `op` against the store on the blocking pool while holding the lock.
    ///
    /// Every store access goes through here, so a check-then-generate inside
    /// one `op` cannot interleave with another request.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T, (StatusCode, String)>
    where
        F: FnOnce(&mut FortuneHistoryStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || -> Result<T, (StatusCode, String)> {
            let mut guard = store.lock().map_err(|_| {
                error!("Fortune store lock is poisoned");
                internal_error()
            })?;
            Ok(op(&mut guard))
        })
        .await
        .map_err(|e| {
            error!("Fortune store task failed: {:?}", e);
            internal_error()
        })?
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Fortune store is unavailable".to_string(),
    )
}
