//! Caller identity for page requests.
//!
//! The access token comes from an `Authorization: Bearer` header or, for
//! browser form posts, the `access_token` cookie. A missing, unknown or
//! unverifiable token yields a signed-out session rather than a rejection:
//! the page still renders, it just refuses mutations.

use std::convert::Infallible;

use axum::extract::FromRef;
use axum::http::header::{AUTHORIZATION, HOST, ORIGIN};
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::backend::User;
use crate::state::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extract the caller's access token. The bearer header wins over the cookie.
pub(crate) fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    let jar = CookieJar::from_headers(headers);
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Optional signed-in user. Never rejects.
pub struct Session {
    pub user: Option<User>,
    /// Token the user was resolved from; `None` when signed out.
    pub access_token: Option<String>,
}

impl Session {
    fn signed_out() -> Self {
        Self { user: None, access_token: None }
    }
}

impl<S> axum::extract::FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = access_token(&parts.headers) else {
            return Ok(Self::signed_out());
        };

        let app_state = AppState::from_ref(state);
        match app_state.resolve_user(&token).await {
            Ok(Some(user)) => Ok(Self { user: Some(user), access_token: Some(token) }),
            Ok(None) => {
                tracing::debug!("access token not recognized; treating as signed out");
                Ok(Self::signed_out())
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity lookup failed; treating as signed out");
                Ok(Self::signed_out())
            }
        }
    }
}

// =============================================================================
// SAME-ORIGIN GUARD
// =============================================================================

/// True when the browser says the request came from another site. Requests
/// without an `Origin` header (non-browser clients) pass.
pub(crate) fn is_cross_origin(headers: &HeaderMap) -> bool {
    let Some(origin) = headers.get(ORIGIN) else {
        return false;
    };
    let Ok(origin) = origin.to_str() else {
        return true;
    };
    let Some(host) = headers.get(HOST).and_then(|v| v.to_str().ok()) else {
        return true;
    };
    let authority = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    !authority.eq_ignore_ascii_case(host)
}

/// Rejects cross-site form posts, which would otherwise ride on the
/// `access_token` cookie. Put it first on every state-changing handler.
pub struct SameOrigin;

impl<S> axum::extract::FromRequestParts<S> for SameOrigin
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if is_cross_origin(&parts.headers) {
            tracing::warn!(
                origin = ?parts.headers.get(ORIGIN),
                path = %parts.uri.path(),
                "cross-origin post rejected"
            );
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Self)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
