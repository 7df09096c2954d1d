//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The waiting-list page is served as server-rendered HTML. Every page action
//! is a form post that either redirects back to the page or re-renders it with
//! the resulting toasts, so the router only needs the page itself, three
//! action endpoints and a health check.
//! The page is same-origin only: no CORS layer, and the action handlers
//! reject posts whose `Origin` names another site.

pub mod session;
pub mod waitlist;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root))
        .route(waitlist::PAGE_PATH, get(waitlist::show))
        .route("/waiting-list/quick-add", post(waitlist::quick_add))
        .route("/waiting-list/requests", post(waitlist::submit_request))
        .route("/waiting-list/{id}/teach", post(waitlist::offer_to_teach))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root() -> Redirect {
    Redirect::temporary(waitlist::PAGE_PATH)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
