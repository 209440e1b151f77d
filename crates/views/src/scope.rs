//! View lifetime and guarded service calls.
//!
//! A [`ViewScope`] belongs to one open view or dialog. Closing it cancels
//! the token, and any response still in flight is dropped unseen: the
//! view is never mutated and no toast is raised for it.

use std::future::Future;

use businessos_shared::AppResult;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::notify::Notifier;

/// Lifetime of an open view.
#[derive(Debug, Clone)]
pub struct ViewScope {
    token: CancellationToken,
    notifier: Notifier,
}

impl ViewScope {
    /// Open scope reporting to `notifier`.
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self {
            token: CancellationToken::new(),
            notifier,
        }
    }

    /// Scope closed together with this one, e.g. a dialog opened from a page.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            notifier: self.notifier.clone(),
        }
    }

    /// The toast queue.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Token that closes the view when cancelled, for use from other tasks.
    #[must_use]
    pub fn closer(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Closes the view.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// True once closed.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Awaits `call` unless the view closes first.
    ///
    /// Returns `Some` on success while still open. On failure one error toast
    /// titled `title` is pushed and `None` returned. A closed view gets
    /// `None` and no toast.
    pub async fn run<T, F>(&self, title: &str, call: F) -> Option<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_closed() {
            debug!(title, "view closed, call skipped");
            return None;
        }
        let result = tokio::select! {
            biased;
            () = self.token.cancelled() => {
                debug!(title, "view closed, response discarded");
                return None;
            }
            result = call => result,
        };
        self.settle(title, result)
    }

    /// Like [`run`](Self::run), except a call already started is awaited to
    /// the end even if the view closes meanwhile.
    ///
    /// For multi-step writes that roll themselves back on failure. Closing
    /// still discards the outcome: `None` and no toast.
    pub async fn run_to_end<T, F>(&self, title: &str, call: F) -> Option<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_closed() {
            debug!(title, "view closed, call skipped");
            return None;
        }
        let result = call.await;
        if self.is_closed() {
            debug!(title, "view closed, response discarded");
        }
        self.settle(title, result)
    }

    fn settle<T>(&self, title: &str, result: AppResult<T>) -> Option<T> {
        if self.is_closed() {
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.notifier.failure(title, &err);
                None
            }
        }
    }
}
