//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! owns one backend handle. Each request builds its own `WaitingListPage`
//! from that handle, scoped to the caller's access token so the hosted store
//! applies its row-level rules to the signed-in user.

use std::sync::Arc;

use crate::backend::{
    BackendError, IdentityProvider, MemoryBackend, RestBackend, SkillCatalog, User, WaitingListApi,
};
use crate::config::MemorySeed;
use crate::page::WaitingListPage;
use crate::page::notify::Notifier;

// =============================================================================
// BACKEND HANDLE
// =============================================================================

/// Concrete store the server talks to.
#[derive(Clone)]
pub enum BackendHandle {
    Rest(RestBackend),
    Memory(Arc<MemoryBackend>),
}

impl BackendHandle {
    /// Build an in-memory backend populated from `seed`.
    pub async fn memory(seed: &MemorySeed) -> Self {
        let backend = MemoryBackend::new();
        let names: Vec<&str> = seed.skills.iter().map(String::as_str).collect();
        backend.seed_skills(&names).await;
        if let Some(token) = &seed.dev_token {
            let user = User { id: uuid::Uuid::new_v4().to_string(), email: seed.dev_email.clone() };
            backend.register_session(token, user).await;
        }
        Self::Memory(Arc::new(backend))
    }

    fn identity(&self) -> &dyn IdentityProvider {
        match self {
            Self::Rest(rest) => rest,
            Self::Memory(memory) => memory.as_ref(),
        }
    }

    /// Waiting-list and catalog handles acting on behalf of `access_token`.
    fn scoped(&self, access_token: Option<&str>) -> (Arc<dyn WaitingListApi>, Arc<dyn SkillCatalog>) {
        match self {
            Self::Rest(rest) => {
                let scoped = Arc::new(match access_token {
                    Some(token) => rest.with_access_token(token),
                    None => rest.clone(),
                });
                (scoped.clone(), scoped)
            }
            Self::Memory(memory) => (memory.clone(), memory.clone()),
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendHandle,
}

impl AppState {
    #[must_use]
    pub fn new(backend: BackendHandle) -> Self {
        Self { backend }
    }

    /// Resolve an access token to the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the identity service cannot be reached.
    pub async fn resolve_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        self.backend.identity().resolve_user(access_token).await
    }

    /// Fresh page controller for one request.
    pub fn page(&self, access_token: Option<&str>, notifier: Arc<dyn Notifier>) -> WaitingListPage {
        let (waitlist, catalog) = self.backend.scoped(access_token);
        WaitingListPage::new(waitlist, catalog, notifier)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
