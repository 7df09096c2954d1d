//! REST client for the hosted backend-as-a-service.
//!
//! Thin HTTP wrapper over the store's row API (`/rest/v1/<table>`) and the
//! auth service (`/auth/v1/user`). Requests carry the project `apikey` plus a
//! bearer token: the signed-in user's access token when the client is scoped
//! to a session, the project key otherwise. Parsing is kept in pure functions
//! for testability.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};

use super::types::{BackendError, NewWaitingListEntry, SkillItem, User, UserSkill, WaitingListEntry};
use super::{IdentityProvider, SkillCatalog, WaitingListApi};
use crate::config::BackendConfig;

const WAITING_LIST_TABLE: &str = "waiting_list_entries";
const SKILLS_TABLE: &str = "skills";
const USER_SKILLS_TABLE: &str = "user_skills";

const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestBackend {
    /// Build a client from typed backend config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.clone(), api_key: config.api_key.clone(), access_token: None })
    }

    /// Clone of this client that acts on behalf of a signed-in session.
    #[must_use]
    pub fn with_access_token(&self, access_token: &str) -> Self {
        Self { access_token: Some(access_token.to_owned()), ..self.clone() }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }
}

// =============================================================================
// URLS
// =============================================================================

fn table_url(base_url: &str, table: &str) -> String {
    format!("{base_url}/rest/v1/{table}")
}

fn auth_user_url(base_url: &str) -> String {
    format!("{base_url}/auth/v1/user")
}

/// Row filter selecting a single entry by id.
fn id_filter(entry_id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{entry_id}"))]
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_entries(json: &str) -> Result<Vec<WaitingListEntry>, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

fn parse_skills(json: &str) -> Result<Vec<SkillItem>, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

fn parse_user(json: &str) -> Result<User, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Inserts with `return=representation` answer with a one-row array.
fn parse_inserted_entry(json: &str) -> Result<WaitingListEntry, BackendError> {
    parse_entries(json)?
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::Parse("insert returned no rows".to_owned()))
}

async fn read_success_body(response: Response) -> Result<String, BackendError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| BackendError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(BackendError::Status { status, body: text });
    }
    Ok(text)
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

#[async_trait::async_trait]
impl WaitingListApi for RestBackend {
    async fn fetch_waiting_list_entries(&self) -> Result<Vec<WaitingListEntry>, BackendError> {
        let url = table_url(&self.base_url, WAITING_LIST_TABLE);
        let response = self
            .request(Method::GET, &url)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_entries(&read_success_body(response).await?)
    }

    async fn add_to_waiting_list(&self, entry: &NewWaitingListEntry) -> Result<WaitingListEntry, BackendError> {
        let url = table_url(&self.base_url, WAITING_LIST_TABLE);
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(entry)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_inserted_entry(&read_success_body(response).await?)
    }

    async fn remove_from_waiting_list(&self, entry_id: &str) -> Result<(), BackendError> {
        let url = table_url(&self.base_url, WAITING_LIST_TABLE);
        let response = self
            .request(Method::DELETE, &url)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&id_filter(entry_id))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let deleted = parse_entries(&read_success_body(response).await?)?;
        if deleted.is_empty() {
            return Err(BackendError::NotFound(entry_id.to_owned()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SkillCatalog for RestBackend {
    async fn list_skills(&self) -> Result<Vec<SkillItem>, BackendError> {
        let url = table_url(&self.base_url, SKILLS_TABLE);
        let response = self
            .request(Method::GET, &url)
            .query(&[("select", "id,name")])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        parse_skills(&read_success_body(response).await?)
    }

    async fn insert_user_skill(&self, record: &UserSkill) -> Result<(), BackendError> {
        let url = table_url(&self.base_url, USER_SKILLS_TABLE);
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", RETURN_MINIMAL)
            .json(record)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        read_success_body(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RestBackend {
    async fn resolve_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        let url = auth_user_url(&self.base_url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        if matches!(response.status().as_u16(), 401 | 403) {
            return Ok(None);
        }
        parse_user(&read_success_body(response).await?).map(Some)
    }
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
