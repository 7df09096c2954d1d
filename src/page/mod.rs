//! Skill waiting-list page controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page lets a signed-in user file a skill they want to learn and offer
//! to teach a skill someone else is waiting for. It owns a cached copy of the
//! waiting list and the skill catalog; the remote store owns the data.
//!
//! CONCURRENCY
//! ===========
//! State sits behind an async `RwLock` that is never held across a remote
//! call. An in-flight counter backs the `loading` flag: mutating flows refuse
//! to start while it is non-zero, and the initial catalog/list loads run
//! concurrently without touching each other's state.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures toast immediately and never reach the backend. Remote
//! failures are logged and surface one generic toast; no flow retries. The
//! teach flow inserts the association before deleting the entry, so a failed
//! delete after a successful insert leaves the association behind. That case
//! is reported as `PageError::PartialTeachOffer` and logged at warn level.

pub mod form;
pub mod notify;
pub mod render;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::backend::types::find_skill;
use crate::backend::{
    BackendError, NewWaitingListEntry, SkillCatalog, SkillItem, User, UserSkill, WaitingListApi, WaitingListEntry,
};
use form::{RequestForm, ValidationError, validate_quick_add, validate_request};
use notify::{Notifier, Toast};
use render::EntryRow;


// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another load or mutation is still in flight.
    #[error("another operation is in flight")]
    Busy,

    #[error("remote call failed: {0}")]
    Remote(#[from] BackendError),

    /// The teach association was stored but the entry could not be removed.
    #[error("teach offer for skill {skill_id} recorded but entry {entry_id} was not removed: {source}")]
    PartialTeachOffer { entry_id: String, skill_id: String, source: BackendError },

    #[error("waiting list entry {0} is not loaded")]
    EntryNotFound(String),
}

// =============================================================================
// STATE
// =============================================================================

/// Client-side page state.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub entries: Vec<WaitingListEntry>,
    pub skills: Vec<SkillItem>,
    /// Quick-add shorthand input.
    pub quick_add: String,
    pub form: RequestForm,
    in_flight: usize,
}

impl PageState {
    #[must_use]
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeachOutcome {
    /// No user was signed in; nothing happened.
    NotSignedIn,
    /// The entry was removed. `skill_id` is set when a catalog match was
    /// recorded as a teach association.
    Offered { skill: String, skill_id: Option<String> },
}

/// Everything the two panels need to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<EntryRow>,
    pub loading: bool,
    pub signed_in: bool,
    pub quick_add: String,
    pub form: RequestForm,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct WaitingListPage {
    waitlist: Arc<dyn WaitingListApi>,
    catalog: Arc<dyn SkillCatalog>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<PageState>,
}

impl WaitingListPage {
    #[must_use]
    pub fn new(waitlist: Arc<dyn WaitingListApi>, catalog: Arc<dyn SkillCatalog>, notifier: Arc<dyn Notifier>) -> Self {
        Self { waitlist, catalog, notifier, state: RwLock::new(PageState::default()) }
    }

    /// First display: load the catalog and the waiting list concurrently.
    /// Each load reports its own failure.
    pub async fn mount(&self) {
        let (_catalog, _entries) = tokio::join!(self.load_skill_catalog(), self.load_waiting_list());
    }

    /// Replace the cached waiting list with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Remote`] if the fetch fails; the previous cache is kept.
    pub async fn load_waiting_list(&self) -> Result<(), PageError> {
        self.state.write().await.in_flight += 1;
        let result = self.refresh_entries().await;
        self.finish().await;
        result
    }

    /// Load `{id, name}` catalog pairs. Failure is logged only: teach offers
    /// then proceed without an association insert.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Remote`] if the select fails.
    pub async fn load_skill_catalog(&self) -> Result<(), PageError> {
        match self.catalog.list_skills().await {
            Ok(skills) => {
                debug!(count = skills.len(), "skill catalog loaded");
                self.state.write().await.skills = skills;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "skill catalog load failed; teach offers will not record associations");
                Err(e.into())
            }
        }
    }

    pub async fn set_quick_add(&self, value: impl Into<String>) {
        self.state.write().await.quick_add = value.into();
    }

    pub async fn set_form(&self, form: RequestForm) {
        self.state.write().await.form = form;
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> PageState {
        self.state.read().await.clone()
    }

    pub async fn view(&self, user: Option<&User>) -> PageView {
        let state = self.state.read().await;
        PageView {
            rows: render::entry_rows(&state.entries),
            loading: state.loading(),
            signed_in: user.is_some(),
            quick_add: state.quick_add.clone(),
            form: state.form.clone(),
        }
    }

    /// Submit the quick-add field as a new entry without a category.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Validation`] without a remote call when the user is
    /// absent or the field is blank, [`PageError::Busy`] while another
    /// operation runs, or [`PageError::Remote`] if the add fails.
    pub async fn quick_add(&self, user: Option<&User>) -> Result<(), PageError> {
        let input = self.state.read().await.quick_add.clone();
        let entry = self.validated(validate_quick_add(user, &input))?;
        self.submit(entry, |state| state.quick_add.clear()).await
    }

    /// Submit the full request form.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Validation`] without a remote call when the user is
    /// absent or the skill name or category is missing, [`PageError::Busy`]
    /// while another operation runs, or [`PageError::Remote`] if the add fails.
    pub async fn submit_request(&self, user: Option<&User>) -> Result<(), PageError> {
        let form = self.state.read().await.form.clone();
        let entry = self.validated(validate_request(user, &form))?;
        self.submit(entry, |state| state.form = RequestForm::default()).await
    }

    /// Declare the signed-in user can teach the skill behind `entry_id`.
    ///
    /// A case-insensitive catalog match records a `teach` association first;
    /// the entry is then removed remotely and dropped from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Remote`] when the association insert or the
    /// removal fails, [`PageError::PartialTeachOffer`] when the removal fails
    /// after the association was stored, [`PageError::EntryNotFound`] for an
    /// id not in the cache, or [`PageError::Busy`].
    pub async fn offer_to_teach(&self, user: Option<&User>, entry_id: &str) -> Result<TeachOutcome, PageError> {
        let Some(user) = user else {
            debug!(entry_id, "teach offer ignored: not signed in");
            return Ok(TeachOutcome::NotSignedIn);
        };
        self.begin().await?;
        let result = self.offer_to_teach_inner(user, entry_id).await;
        self.finish().await;
        result
    }

    // -------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------

    async fn begin(&self) -> Result<(), PageError> {
        let mut state = self.state.write().await;
        if state.loading() {
            debug!("operation rejected while another is in flight");
            return Err(PageError::Busy);
        }
        state.in_flight += 1;
        Ok(())
    }

    async fn finish(&self) {
        let mut state = self.state.write().await;
        state.in_flight = state.in_flight.saturating_sub(1);
    }

    fn validated<T>(&self, result: Result<T, ValidationError>) -> Result<T, PageError> {
        result.map_err(|e| {
            debug!(reason = %e, "submission rejected");
            self.notifier.notify(Toast::error(e.title(), e.description()));
            PageError::Validation(e)
        })
    }

    async fn refresh_entries(&self) -> Result<(), PageError> {
        match self.waitlist.fetch_waiting_list_entries().await {
            Ok(entries) => {
                debug!(count = entries.len(), "waiting list loaded");
                self.state.write().await.entries = entries;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "waiting list load failed");
                self.notifier.notify(Toast::generic_error());
                Err(e.into())
            }
        }
    }

    async fn submit<F>(&self, entry: NewWaitingListEntry, reset: F) -> Result<(), PageError>
    where
        F: FnOnce(&mut PageState),
    {
        self.begin().await?;
        let result = self.submit_inner(entry, reset).await;
        self.finish().await;
        result
    }

    async fn submit_inner<F>(&self, entry: NewWaitingListEntry, reset: F) -> Result<(), PageError>
    where
        F: FnOnce(&mut PageState),
    {
        let stored = match self.waitlist.add_to_waiting_list(&entry).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, skill = %entry.skill_name, "waiting list submission failed");
                self.notifier.notify(Toast::generic_error());
                return Err(e.into());
            }
        };
        info!(skill = %entry.skill_name, user_id = %entry.user_id, "waiting list entry added");

        reset(&mut *self.state.write().await);
        // A failed reload toasts on its own; the stored row still goes into the cache.
        if self.refresh_entries().await.is_err() {
            let mut state = self.state.write().await;
            if !state.entries.iter().any(|e| e.id == stored.id) {
                state.entries.insert(0, stored);
            }
        }
        self.notifier.notify(Toast::submitted());
        Ok(())
    }

    async fn offer_to_teach_inner(&self, user: &User, entry_id: &str) -> Result<TeachOutcome, PageError> {
        let (entry, skill) = {
            let state = self.state.read().await;
            let Some(entry) = state.entries.iter().find(|e| e.id == entry_id).cloned() else {
                drop(state);
                error!(entry_id, "teach offer for unknown entry");
                self.notifier.notify(Toast::generic_error());
                return Err(PageError::EntryNotFound(entry_id.to_owned()));
            };
            let skill = find_skill(&state.skills, &entry.desired_skill).cloned();
            (entry, skill)
        };

        if let Some(skill) = &skill {
            if let Err(e) = self.catalog.insert_user_skill(&UserSkill::teach(&user.id, &skill.id)).await {
                error!(error = %e, user_id = %user.id, skill_id = %skill.id, "teach association insert failed");
                self.notifier.notify(Toast::generic_error());
                return Err(e.into());
            }
        } else {
            debug!(skill = %entry.desired_skill, "no catalog match; skipping teach association");
        }

        if let Err(e) = self.waitlist.remove_from_waiting_list(&entry.id).await {
            error!(error = %e, entry_id = %entry.id, "waiting list removal failed");
            self.notifier.notify(Toast::generic_error());
            return Err(match skill {
                Some(skill) => {
                    warn!(
                        user_id = %user.id,
                        skill_id = %skill.id,
                        entry_id = %entry.id,
                        "teach association stored but entry still listed; no compensating delete issued"
                    );
                    PageError::PartialTeachOffer { entry_id: entry.id, skill_id: skill.id, source: e }
                }
                None => e.into(),
            });
        }

        self.state.write().await.entries.retain(|e| e.id != entry.id);
        info!(user_id = %user.id, skill = %entry.desired_skill, "teach offer recorded");
        self.notifier.notify(Toast::teach_offered(&entry.desired_skill));
        Ok(TeachOutcome::Offered { skill: entry.desired_skill, skill_id: skill.map(|s| s.id) })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
