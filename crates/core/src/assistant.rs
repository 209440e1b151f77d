//! Rule-based assistant.
//!
//! Replies are canned. A message is matched against keyword rules; the
//! rule with the most keyword hits wins and earlier rules win ties. With no
//! hits the fallback reply is used.

use serde::{Deserialize, Serialize};

/// One keyword rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Topic label reported with the reply.
    pub topic: String,
    /// Lowercase keywords; each one found in the message scores a hit.
    pub keywords: Vec<String>,
    /// Canned reply.
    pub reply: String,
}

impl Rule {
    /// Builds a rule from string slices.
    #[must_use]
    pub fn new(topic: &str, keywords: &[&str], reply: &str) -> Self {
        Self {
            topic: topic.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            reply: reply.to_string(),
        }
    }

    fn hits(&self, message: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| message.contains(k.as_str()))
            .count()
    }
}

/// Assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Matched topic, `None` for the fallback.
    pub topic: Option<String>,
    /// Reply text.
    pub text: String,
}

/// Keyword matcher over canned replies.
#[derive(Debug, Clone)]
pub struct Assistant {
    rules: Vec<Rule>,
    fallback: String,
}

const FALLBACK: &str = "I'm not sure about that yet. Try asking about budgets, invoices, \
tasks, employees, documents or permissions.";

impl Default for Assistant {
    fn default() -> Self {
        Self::new(
            vec![
                Rule::new(
                    "budgets",
                    &["budget", "allocat", "spend", "overspend"],
                    "Open Finance > Budgets to see allocations. The analysis tab shows \
                     spending per category and flags anything over 90% of its allocation.",
                ),
                Rule::new(
                    "invoices",
                    &["invoice", "bill", "overdue", "payment"],
                    "Invoices live under Finance > Invoices. Totals are the sum of line \
                     items plus tax; unpaid invoices past their due date show as Overdue.",
                ),
                Rule::new(
                    "tasks",
                    &["task", "todo", "deadline", "due"],
                    "The task manager can filter by status, priority and category and \
                     sort by due date. Tasks without a due date are listed last.",
                ),
                Rule::new(
                    "hr",
                    &["employee", "department", "hire", "manager", "leave"],
                    "Employee records and departments are under HR. Each employee can \
                     have a manager, which builds the reporting chain.",
                ),
                Rule::new(
                    "documents",
                    &["document", "share", "version", "file"],
                    "Documents can be shared with view, comment or edit access. Every \
                     upload creates a new version you can restore later.",
                ),
                Rule::new(
                    "permissions",
                    &["permission", "role", "access", "admin"],
                    "Admins manage roles under Admin > Roles. Pick a role to tick the \
                     permissions it grants; system roles cannot be deleted.",
                ),
                Rule::new(
                    "calendar",
                    &["calendar", "meeting", "event", "schedule"],
                    "The calendar marks every day with events. Select a day to list \
                     what is on it.",
                ),
            ],
            FALLBACK,
        )
    }
}

impl Assistant {
    /// Creates an assistant with custom rules.
    #[must_use]
    pub fn new(rules: Vec<Rule>, fallback: &str) -> Self {
        Self {
            rules,
            fallback: fallback.to_string(),
        }
    }

    /// Topics known to this assistant, in rule order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.topic.as_str())
    }

    /// Answers a message.
    #[must_use]
    pub fn reply(&self, message: &str) -> Reply {
        let message = message.to_lowercase();
        let mut best: Option<(&Rule, usize)> = None;
        for rule in &self.rules {
            let hits = rule.hits(&message);
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((rule, hits));
            }
        }
        match best {
            Some((rule, _)) => Reply {
                topic: Some(rule.topic.clone()),
                text: rule.reply.clone(),
            },
            None => Reply {
                topic: None,
                text: self.fallback.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("How do I create a BUDGET?", Some("budgets"))]
    #[case("which invoice is overdue", Some("invoices"))]
    #[case("who is my manager", Some("hr"))]
    #[case("share this file with Bob", Some("documents"))]
    #[case("tell me a joke", None)]
    fn test_default_rules(#[case] message: &str, #[case] topic: Option<&str>) {
        let reply = Assistant::default().reply(message);
        assert_eq!(reply.topic.as_deref(), topic);
        assert!(!reply.text.is_empty());
    }

    #[test]
    fn test_most_hits_wins_then_order() {
        let assistant = Assistant::new(
            vec![
                Rule::new("a", &["alpha"], "A"),
                Rule::new("b", &["alpha", "beta"], "B"),
                Rule::new("c", &["alpha"], "C"),
            ],
            "?",
        );
        assert_eq!(assistant.reply("alpha beta").text, "B");
        assert_eq!(assistant.reply("alpha").text, "A");
        assert_eq!(assistant.reply("gamma").text, "?");
    }

    #[test]
    fn test_topics() {
        let topics: Vec<_> = Assistant::default().topics().map(str::to_owned).collect();
        assert_eq!(topics.first().map(String::as_str), Some("budgets"));
        assert_eq!(topics.len(), 7);
    }
}
