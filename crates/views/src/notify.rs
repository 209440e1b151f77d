//! Toast notifications.
//!
//! View-models push toasts into a shared [`Notifier`]; the front end drains
//! them. Every failed operation produces exactly one error toast.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use businessos_shared::AppError;
use tracing::error;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Operation succeeded.
    Success,
    /// Neutral information.
    Info,
    /// Operation failed.
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Short heading, e.g. "Failed to load categories".
    pub title: String,
    /// Body text.
    pub message: String,
}

/// Shared toast queue. Clones push into the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Toast>>>,
}

impl Notifier {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes a toast.
    pub fn push(&self, level: ToastLevel, title: impl Into<String>, message: impl Into<String>) {
        self.lock().push_back(Toast {
            level,
            title: title.into(),
            message: message.into(),
        });
    }

    /// Success toast.
    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Success, title, message);
    }

    /// Info toast.
    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Info, title, message);
    }

    /// Logs the failure and pushes one error toast with its user-facing message.
    pub fn failure(&self, title: &str, err: &AppError) {
        error!(title, error = %err, code = err.error_code(), "view operation failed");
        self.push(ToastLevel::Error, title, err.user_message());
    }

    /// Removes and returns every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.lock().drain(..).collect()
    }

    /// Copy of the queue without draining it.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().iter().cloned().collect()
    }

    /// Number of queued toasts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of queued error toasts.
    pub fn error_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|t| t.level == ToastLevel::Error)
            .count()
    }
}
