//! Failure injection.
//!
//! Tests arm a fault for a method and path prefix; the next matching
//! requests get the configured status and detail instead of reaching the
//! handler, optionally after a delay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::http::Method;
use dashmap::DashMap;

/// One armed fault.
#[derive(Debug, Clone)]
pub struct Fault {
    /// Method to match; `None` matches any.
    pub method: Option<Method>,
    /// Path prefix to match, e.g. `/api/finance/budgets`.
    pub path_prefix: String,
    /// Status to answer with. `None` only delays and lets the request through.
    pub status: Option<u16>,
    /// `detail` of the error body.
    pub detail: String,
    /// Delay before answering.
    pub delay: Option<Duration>,
    /// Requests left to affect; `None` never expires.
    pub remaining: Option<u32>,
}

impl Fault {
    /// Fails matching requests with `status` until disarmed.
    pub fn fail(method: Option<Method>, path_prefix: &str, status: u16, detail: &str) -> Self {
        Self {
            method,
            path_prefix: path_prefix.to_string(),
            status: Some(status),
            detail: detail.to_string(),
            delay: None,
            remaining: None,
        }
    }

    /// Delays matching requests without failing them.
    pub fn delay(method: Option<Method>, path_prefix: &str, delay: Duration) -> Self {
        Self {
            method,
            path_prefix: path_prefix.to_string(),
            status: None,
            detail: String::new(),
            delay: Some(delay),
            remaining: None,
        }
    }

    /// Limits the fault to the next `count` matching requests.
    #[must_use]
    pub fn times(mut self, count: u32) -> Self {
        self.remaining = Some(count);
        self
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && path.starts_with(&self.path_prefix)
    }
}

/// Outcome of checking a request against the armed faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triggered {
    /// Status to answer with, if the request should fail.
    pub status: Option<u16>,
    /// Error detail.
    pub detail: String,
    /// Delay to apply first.
    pub delay: Option<Duration>,
}

/// Registry of armed faults.
#[derive(Debug, Default)]
pub struct Faults {
    armed: DashMap<u64, Fault>,
    next_id: AtomicU64,
}

impl Faults {
    /// Arms a fault and returns its handle.
    pub fn arm(&self, fault: Fault) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.armed.insert(id, fault);
        id
    }

    /// Disarms one fault.
    pub fn disarm(&self, id: u64) {
        self.armed.remove(&id);
    }

    /// Number of faults still armed.
    pub fn armed(&self) -> usize {
        self.armed.len()
    }

    /// Disarms everything.
    pub fn clear(&self) {
        self.armed.clear();
    }

    /// Finds the oldest fault matching the request and consumes one use of it.
    pub fn check(&self, method: &Method, path: &str) -> Option<Triggered> {
        let mut ids: Vec<u64> = self
            .armed
            .iter()
            .filter(|entry| entry.matches(method, path))
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        let id = *ids.first()?;

        let mut exhausted = false;
        let triggered = self.armed.get_mut(&id).map(|mut fault| {
            if let Some(remaining) = fault.remaining.as_mut() {
                *remaining = remaining.saturating_sub(1);
                exhausted = *remaining == 0;
            }
            Triggered {
                status: fault.status,
                detail: fault.detail.clone(),
                delay: fault.delay,
            }
        });
        if exhausted {
            self.armed.remove(&id);
        }
        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_matches_method_and_prefix() {
        let faults = Faults::default();
        faults.arm(Fault::fail(
            Some(Method::POST),
            "/api/finance/budgets",
            500,
            "boom",
        ));

        assert!(faults.check(&Method::GET, "/api/finance/budgets").is_none());
        assert!(faults.check(&Method::POST, "/api/hr/employees").is_none());
        let hit = faults
            .check(&Method::POST, "/api/finance/budgets/abc/categories")
            .unwrap();
        assert_eq!(hit.status, Some(500));
        assert_eq!(hit.detail, "boom");
    }

    #[test]
    fn test_times_expires() {
        let faults = Faults::default();
        faults.arm(Fault::fail(None, "/api/tasks", 503, "down").times(2));
        assert!(faults.check(&Method::GET, "/api/tasks").is_some());
        assert!(faults.check(&Method::GET, "/api/tasks").is_some());
        assert!(faults.check(&Method::GET, "/api/tasks").is_none());
    }

    #[test]
    fn test_disarm_and_clear() {
        let faults = Faults::default();
        let id = faults.arm(Fault::fail(None, "/api", 500, "x"));
        faults.disarm(id);
        assert!(faults.check(&Method::GET, "/api/tasks").is_none());
        faults.arm(Fault::delay(None, "/api", Duration::from_millis(5)));
        faults.clear();
        assert!(faults.check(&Method::GET, "/api/tasks").is_none());
    }
}
