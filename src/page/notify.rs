//! Toast notifications raised by the page controller.
//!
//! DESIGN
//! ======
//! The controller only sees the `Notifier` trait. `TracingNotifier` logs
//! toasts for headless use; `ToastBuffer` collects them so the HTTP layer can
//! render them with the page that produced them.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

pub const GENERIC_ERROR_TITLE: &str = "Error";
pub const GENERIC_ERROR_DESCRIPTION: &str = "Something went wrong. Please try again.";
pub const SUBMITTED_TITLE: &str = "Request submitted";
pub const SUBMITTED_DESCRIPTION: &str = "Your skill request has been added to the waiting list.";
pub const TEACH_TITLE: &str = "Thank you!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

impl ToastVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
        }
    }
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    #[must_use]
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_owned(), description: description.into(), variant: ToastVariant::Default }
    }

    #[must_use]
    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self { title: title.to_owned(), description: description.into(), variant: ToastVariant::Destructive }
    }

    #[must_use]
    pub fn submitted() -> Self {
        Self::success(SUBMITTED_TITLE, SUBMITTED_DESCRIPTION)
    }

    #[must_use]
    pub fn teach_offered(skill: &str) -> Self {
        Self::success(TEACH_TITLE, format!("You've offered to teach {skill}."))
    }

    /// Uniform message for every remote failure.
    #[must_use]
    pub fn generic_error() -> Self {
        Self::error(GENERIC_ERROR_TITLE, GENERIC_ERROR_DESCRIPTION)
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        tracing::info!(
            title = %toast.title,
            description = %toast.description,
            variant = toast.variant.as_str(),
            "toast"
        );
    }
}

/// Collects toasts in order of arrival and logs each one through
/// [`TracingNotifier`]. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct ToastBuffer {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *toasts)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for ToastBuffer {
    fn notify(&self, toast: Toast) {
        TracingNotifier.notify(toast.clone());
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
