//! In-process backend for local runs without a hosted store.
//!
//! Holds the three collections behind one `RwLock`. Ids are random UUIDs and
//! timestamps come from the wall clock, matching what the hosted store assigns.

use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{BackendError, NewWaitingListEntry, SkillItem, User, UserSkill, WaitingListEntry};
use super::{IdentityProvider, SkillCatalog, WaitingListApi};

#[derive(Default)]
struct MemoryStore {
    entries: Vec<WaitingListEntry>,
    skills: Vec<SkillItem>,
    user_skills: Vec<UserSkill>,
    /// Access token -> user.
    sessions: HashMap<String, User>,
}

#[derive(Default)]
pub struct MemoryBackend {
    store: RwLock<MemoryStore>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add catalog skills by name, each under a fresh id.
    pub async fn seed_skills(&self, names: &[&str]) {
        let mut store = self.store.write().await;
        store.skills.extend(names.iter().map(|name| SkillItem {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_owned(),
        }));
    }

    /// Register an access token that resolves to `user`.
    pub async fn register_session(&self, access_token: &str, user: User) {
        let mut store = self.store.write().await;
        store.sessions.insert(access_token.to_owned(), user);
    }

    /// Snapshot of all recorded user/skill associations.
    #[cfg(test)]
    pub async fn user_skills(&self) -> Vec<UserSkill> {
        self.store.read().await.user_skills.clone()
    }
}

#[async_trait::async_trait]
impl WaitingListApi for MemoryBackend {
    async fn fetch_waiting_list_entries(&self) -> Result<Vec<WaitingListEntry>, BackendError> {
        let mut entries = self.store.read().await.entries.clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn add_to_waiting_list(&self, entry: &NewWaitingListEntry) -> Result<WaitingListEntry, BackendError> {
        let stored = WaitingListEntry {
            id: Uuid::new_v4().to_string(),
            desired_skill: entry.skill_name.clone(),
            category: entry.category.map(|c| c.label().to_owned()),
            description: entry.description.clone(),
            notify: entry.notify,
            created_at: OffsetDateTime::now_utc(),
            email: Some(entry.email.clone()),
            user_id: Some(entry.user_id.clone()),
        };
        self.store.write().await.entries.push(stored.clone());
        Ok(stored)
    }

    async fn remove_from_waiting_list(&self, entry_id: &str) -> Result<(), BackendError> {
        let mut store = self.store.write().await;
        let before = store.entries.len();
        store.entries.retain(|e| e.id != entry_id);
        if store.entries.len() == before {
            return Err(BackendError::NotFound(entry_id.to_owned()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SkillCatalog for MemoryBackend {
    async fn list_skills(&self) -> Result<Vec<SkillItem>, BackendError> {
        Ok(self.store.read().await.skills.clone())
    }

    async fn insert_user_skill(&self, record: &UserSkill) -> Result<(), BackendError> {
        self.store.write().await.user_skills.push(record.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MemoryBackend {
    async fn resolve_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        Ok(self.store.read().await.sessions.get(access_token).cloned())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
