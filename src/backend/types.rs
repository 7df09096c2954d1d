//! Backend record types and errors.
//!
//! Records mirror the three remote collections the page touches:
//! `waiting_list_entries`, `skills` and `user_skills`. Field names follow the
//! store's column names so rows deserialize without adapters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by remote store and client API calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The store answered with a non-success HTTP status.
    #[error("backend responded with status {status}")]
    Status { status: u16, body: String },

    /// A response body did not match the expected row shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The addressed record does not exist (or is not visible to the caller).
    #[error("record not found: {0}")]
    NotFound(String),
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Signed-in user as resolved by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Empty for accounts without an email (phone sign-in).
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Fixed set of categories a waiting-list request can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Arts & Crafts")]
    ArtsAndCrafts,
    #[serde(rename = "Cooking & Baking")]
    CookingAndBaking,
    #[serde(rename = "Design")]
    Design,
    #[serde(rename = "Languages")]
    Languages,
    #[serde(rename = "Music")]
    Music,
    #[serde(rename = "Programming & Technology")]
    ProgrammingAndTechnology,
    #[serde(rename = "Sports & Fitness")]
    SportsAndFitness,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 8] = [
        Self::ArtsAndCrafts,
        Self::CookingAndBaking,
        Self::Design,
        Self::Languages,
        Self::Music,
        Self::ProgrammingAndTechnology,
        Self::SportsAndFitness,
        Self::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ArtsAndCrafts => "Arts & Crafts",
            Self::CookingAndBaking => "Cooking & Baking",
            Self::Design => "Design",
            Self::Languages => "Languages",
            Self::Music => "Music",
            Self::ProgrammingAndTechnology => "Programming & Technology",
            Self::SportsAndFitness => "Sports & Fitness",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category label outside the fixed list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| UnknownCategory(trimmed.to_owned()))
    }
}

// =============================================================================
// WAITING LIST
// =============================================================================

/// Trim and lowercase a skill name so variants of the same skill compare equal.
#[must_use]
pub fn normalize_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A pending request to learn a skill. Mirrors `waiting_list_entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingListEntry {
    pub id: String,
    pub desired_skill: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notify: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl WaitingListEntry {
    /// Stored category label, or `Other` when the entry was filed without one.
    #[must_use]
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => Category::Other.label(),
        }
    }

    /// Calendar date the request was created, in the timestamp's own offset.
    #[must_use]
    pub fn requested_on(&self) -> Date {
        self.created_at.date()
    }
}

/// Payload for adding a new waiting-list entry. Serializes to an insert row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWaitingListEntry {
    pub email: String,
    #[serde(rename = "desired_skill")]
    pub skill_name: String,
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only sent when set; stores without a `notify` column accept unchecked requests.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub notify: bool,
    pub user_id: String,
}

// =============================================================================
// SKILL CATALOG
// =============================================================================

/// Catalog skill. Mirrors `skills(id, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillItem {
    pub id: String,
    pub name: String,
}

impl SkillItem {
    /// Case-insensitive name comparison used for teach matching.
    #[must_use]
    pub fn matches(&self, skill_name: &str) -> bool {
        normalize_skill_name(&self.name) == normalize_skill_name(skill_name)
    }
}

/// Find the first catalog skill whose name matches `skill_name`.
#[must_use]
pub fn find_skill<'a>(skills: &'a [SkillItem], skill_name: &str) -> Option<&'a SkillItem> {
    skills.iter().find(|s| s.matches(skill_name))
}

/// Role a user declares for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillRole {
    Teach,
    Learn,
}

/// Association between a user and a catalog skill. Mirrors `user_skills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    pub user_id: String,
    pub skill_id: String,
    #[serde(rename = "type")]
    pub role: SkillRole,
}

impl UserSkill {
    #[must_use]
    pub fn teach(user_id: &str, skill_id: &str) -> Self {
        Self { user_id: user_id.to_owned(), skill_id: skill_id.to_owned(), role: SkillRole::Teach }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
