//! Activity feed.

use businessos_shared::types::ActivityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::any_field_matches;

/// Area an activity entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Task changes.
    Task,
    /// Document edits and shares.
    Document,
    /// Budgets, invoices, transactions.
    Finance,
    /// Employees and departments.
    Hr,
    /// Users, roles, permissions.
    Admin,
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    /// Entry ID.
    pub id: ActivityId,
    /// Who did it.
    pub actor: String,
    /// Verb, e.g. `"created"`.
    pub action: String,
    /// Area.
    pub kind: ActivityKind,
    /// Human-readable summary.
    pub summary: String,
    /// When it happened.
    pub occurred_at: DateTime<Utc>,
}

/// Feed filter.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    /// Restricts to one area.
    pub kind: Option<ActivityKind>,
    /// Matches actor, action or summary.
    pub search: String,
}

/// Filters the feed, newest first. Entries with equal timestamps keep
/// input order.
#[must_use]
pub fn feed(items: &[ActivityItem], filter: &ActivityFilter) -> Vec<ActivityItem> {
    let mut out: Vec<ActivityItem> = items
        .iter()
        .filter(|i| filter.kind.is_none_or(|k| k == i.kind))
        .filter(|i| {
            any_field_matches(
                [i.actor.as_str(), i.action.as_str(), i.summary.as_str()],
                &filter.search,
            )
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(summary: &str, kind: ActivityKind, hour: u32) -> ActivityItem {
        ActivityItem {
            id: ActivityId::new(),
            actor: "Dana".into(),
            action: "updated".into(),
            kind,
            summary: summary.into(),
            occurred_at: Utc.with_ymd_and_hms(2026, 4, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_newest_first_stable() {
        let items = vec![
            item("old", ActivityKind::Task, 8),
            item("tie-a", ActivityKind::Hr, 12),
            item("tie-b", ActivityKind::Task, 12),
            item("mid", ActivityKind::Finance, 10),
        ];
        let out = feed(&items, &ActivityFilter::default());
        let summaries: Vec<_> = out.iter().map(|i| i.summary.as_str()).collect();
        assert_eq!(summaries, ["tie-a", "tie-b", "mid", "old"]);
    }

    #[test]
    fn test_filter_kind_and_search() {
        let items = vec![
            item("Budget Q1 approved", ActivityKind::Finance, 9),
            item("Invoice INV-7 sent", ActivityKind::Finance, 10),
            item("Budget review task", ActivityKind::Task, 11),
        ];
        let filter = ActivityFilter {
            kind: Some(ActivityKind::Finance),
            search: "budget".into(),
        };
        let out = feed(&items, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].summary, "Budget Q1 approved");
    }
}
