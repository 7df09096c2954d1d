//! Waiting-list page routes.
//!
//! Each request mounts a fresh page controller (catalog plus waiting list)
//! and applies the posted action. A rejected action re-renders the page with
//! the toasts it raised and a matching status code. An applied action answers
//! `303 See Other` to `/waiting-list?notice=...`, so a browser refresh repeats
//! the GET and never the post; the GET turns the notice back into its toast.

use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use super::session::{SameOrigin, Session};
use crate::backend::User;
use crate::page::form::{RequestForm, ValidationError};
use crate::page::notify::{Notifier, Toast, ToastBuffer};
use crate::page::render::render_page;
use crate::page::{PageError, TeachOutcome, WaitingListPage};
use crate::state::AppState;

pub const PAGE_PATH: &str = "/waiting-list";

// =============================================================================
// FORM BODIES
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct QuickAddBody {
    #[serde(default)]
    pub new_skill: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub skill_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Checkbox value; absent when unchecked.
    #[serde(default)]
    pub notify: Option<String>,
}

impl From<RequestBody> for RequestForm {
    fn from(body: RequestBody) -> Self {
        Self {
            skill_name: body.skill_name,
            category: body.category,
            description: body.description,
            notify: body.notify.is_some_and(|v| checkbox_on(&v)),
        }
    }
}

fn checkbox_on(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes")
}

// =============================================================================
// NOTICES
// =============================================================================

/// Outcome carried across the post/redirect/get hop.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

const NOTICE_SUBMITTED: &str = "submitted";
const NOTICE_TAUGHT: &str = "taught";

impl Notice {
    fn submitted() -> Self {
        Self { notice: Some(NOTICE_SUBMITTED.to_owned()), skill: None }
    }

    fn taught(skill: &str) -> Self {
        Self { notice: Some(NOTICE_TAUGHT.to_owned()), skill: Some(skill.to_owned()) }
    }

    /// Redirect target for an applied action.
    pub(crate) fn location(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("{PAGE_PATH}?{query}"),
            Ok(_) => PAGE_PATH.to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "notice encoding failed");
                PAGE_PATH.to_owned()
            }
        }
    }

    /// Toast to show on the page the redirect lands on. Unknown notices are ignored.
    pub(crate) fn toast(&self) -> Option<Toast> {
        match self.notice.as_deref()? {
            NOTICE_SUBMITTED => Some(Toast::submitted()),
            NOTICE_TAUGHT => Some(Toast::teach_offered(self.skill.as_deref().unwrap_or("this skill"))),
            _ => None,
        }
    }
}

/// Status code for a failed page action.
pub(crate) fn status_for(error: &PageError) -> StatusCode {
    match error {
        PageError::Validation(ValidationError::NotSignedIn) => StatusCode::UNAUTHORIZED,
        PageError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PageError::Busy => StatusCode::CONFLICT,
        PageError::Remote(_) | PageError::PartialTeachOffer { .. } => StatusCode::BAD_GATEWAY,
        PageError::EntryNotFound(_) => StatusCode::NOT_FOUND,
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

struct MountedPage {
    page: WaitingListPage,
    toasts: ToastBuffer,
}

async fn mount(state: &AppState, session: &Session) -> MountedPage {
    let toasts = ToastBuffer::new();
    let page = state.page(session.access_token.as_deref(), Arc::new(toasts.clone()));
    page.mount().await;
    MountedPage { page, toasts }
}

async fn render(mounted: MountedPage, user: Option<&User>, status: StatusCode) -> Response {
    let view = mounted.page.view(user).await;
    (status, Html(render_page(view, mounted.toasts.drain()))).into_response()
}

/// Re-render after a rejected action; the toasts explain what went wrong.
async fn rejected(mounted: MountedPage, user: Option<&User>, error: &PageError) -> Response {
    tracing::debug!(error = %error, "page action not applied");
    render(mounted, user, status_for(error)).await
}

fn see_other(notice: &Notice) -> Response {
    Redirect::to(&notice.location()).into_response()
}

/// `GET /waiting-list`: render the page, plus the toast for a redirect notice.
pub async fn show(State(state): State<AppState>, session: Session, Query(notice): Query<Notice>) -> Response {
    let mounted = mount(&state, &session).await;
    if let Some(toast) = notice.toast() {
        mounted.toasts.notify(toast);
    }
    render(mounted, session.user.as_ref(), StatusCode::OK).await
}

/// `POST /waiting-list/quick-add`: shorthand request without a category.
pub async fn quick_add(
    _origin: SameOrigin,
    State(state): State<AppState>,
    session: Session,
    Form(body): Form<QuickAddBody>,
) -> Response {
    let mounted = mount(&state, &session).await;
    mounted.page.set_quick_add(body.new_skill).await;
    let result = mounted.page.quick_add(session.user.as_ref()).await;
    match result {
        Ok(()) => see_other(&Notice::submitted()),
        Err(e) => rejected(mounted, session.user.as_ref(), &e).await,
    }
}

/// `POST /waiting-list/requests`: full request form.
pub async fn submit_request(
    _origin: SameOrigin,
    State(state): State<AppState>,
    session: Session,
    Form(body): Form<RequestBody>,
) -> Response {
    let mounted = mount(&state, &session).await;
    mounted.page.set_form(body.into()).await;
    let result = mounted.page.submit_request(session.user.as_ref()).await;
    match result {
        Ok(()) => see_other(&Notice::submitted()),
        Err(e) => rejected(mounted, session.user.as_ref(), &e).await,
    }
}

/// `POST /waiting-list/{id}/teach`: offer to teach the entry's skill.
pub async fn offer_to_teach(
    _origin: SameOrigin,
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Response {
    let mounted = mount(&state, &session).await;
    let result = mounted.page.offer_to_teach(session.user.as_ref(), &entry_id).await;
    match result {
        Ok(TeachOutcome::NotSignedIn) => render(mounted, None, StatusCode::UNAUTHORIZED).await,
        Ok(TeachOutcome::Offered { skill, skill_id }) => {
            tracing::debug!(%entry_id, %skill, associated = skill_id.is_some(), "teach offer applied");
            see_other(&Notice::taught(&skill))
        }
        Err(e) => rejected(mounted, session.user.as_ref(), &e).await,
    }
}

#[cfg(test)]
#[path = "waitlist_test.rs"]
mod tests;
