//! Submission form state and validation.
//!
//! Both entry points (quick-add and the full request form) validate locally
//! and produce a `NewWaitingListEntry`; a validation failure never reaches
//! the backend.

use crate::backend::{Category, NewWaitingListEntry, User};

/// Full request form as bound to the inputs. `category` is the raw select
/// value; an empty string means nothing was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub skill_name: String,
    pub category: String,
    pub description: String,
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("skill name is required")]
    MissingSkillName,
    #[error("category is required")]
    MissingCategory,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl ValidationError {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotSignedIn => "Authentication required",
            Self::MissingSkillName | Self::MissingCategory | Self::UnknownCategory(_) => "Missing information",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotSignedIn => "Please sign in to add skills to the waiting list.",
            Self::MissingSkillName | Self::MissingCategory | Self::UnknownCategory(_) => {
                "Please enter a skill name and select a category."
            }
        }
    }
}

fn signed_in(user: Option<&User>) -> Result<&User, ValidationError> {
    user.ok_or(ValidationError::NotSignedIn)
}

fn skill_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingSkillName);
    }
    Ok(trimmed.to_owned())
}

/// Validate the quick-add shorthand: a signed-in user and a non-empty name.
/// The entry is filed without a category.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_quick_add(user: Option<&User>, new_skill: &str) -> Result<NewWaitingListEntry, ValidationError> {
    let user = signed_in(user)?;
    let skill_name = skill_name(new_skill)?;
    Ok(NewWaitingListEntry {
        email: user.email.clone(),
        skill_name,
        category: None,
        description: None,
        notify: false,
        user_id: user.id.clone(),
    })
}

/// Validate the full request form: a signed-in user, a non-empty name and a
/// category from the fixed list.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_request(user: Option<&User>, form: &RequestForm) -> Result<NewWaitingListEntry, ValidationError> {
    let user = signed_in(user)?;
    let skill_name = skill_name(&form.skill_name)?;
    if form.category.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    let category = form
        .category
        .parse::<Category>()
        .map_err(|e| ValidationError::UnknownCategory(e.0))?;
    let description = Some(form.description.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_owned);
    Ok(NewWaitingListEntry {
        email: user.email.clone(),
        skill_name,
        category: Some(category),
        description,
        notify: form.notify,
        user_id: user.id.clone(),
    })
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
