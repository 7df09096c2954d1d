//! Remote store seams consumed by the waiting-list page.
//!
//! DESIGN
//! ======
//! The page never talks HTTP directly. It sees three narrow async traits: the
//! waiting-list client API, direct catalog/association access, and identity
//! resolution. `RestBackend` implements all three against the hosted store;
//! `MemoryBackend` implements them in-process for local runs.

pub mod memory;
pub mod rest;
pub mod types;

pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use types::{
    BackendError, Category, NewWaitingListEntry, SkillItem, SkillRole, User, UserSkill, WaitingListEntry,
};

/// Waiting-list client API.
#[async_trait::async_trait]
pub trait WaitingListApi: Send + Sync {
    /// Fetch every pending entry, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the store is unreachable or the rows are malformed.
    async fn fetch_waiting_list_entries(&self) -> Result<Vec<WaitingListEntry>, BackendError>;

    /// Insert a new entry and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the insert is rejected.
    async fn add_to_waiting_list(&self, entry: &NewWaitingListEntry) -> Result<WaitingListEntry, BackendError>;

    /// Delete an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when no row was deleted, or another
    /// [`BackendError`] if the call fails.
    async fn remove_from_waiting_list(&self, entry_id: &str) -> Result<(), BackendError>;
}

/// Direct access to the skill catalog and user/skill associations.
#[async_trait::async_trait]
pub trait SkillCatalog: Send + Sync {
    /// Select `{id, name}` for every catalog skill.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the select fails.
    async fn list_skills(&self) -> Result<Vec<SkillItem>, BackendError>;

    /// Insert one `user_skills` row.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the insert is rejected.
    async fn insert_user_skill(&self, record: &UserSkill) -> Result<(), BackendError>;
}

/// Authentication context: resolves an access token to the signed-in user.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns `Ok(None)` when the token is unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the auth service cannot be reached.
    async fn resolve_user(&self, access_token: &str) -> Result<Option<User>, BackendError>;
}
