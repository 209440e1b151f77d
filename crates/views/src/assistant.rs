//! Help assistant conversation.
//!
//! Answers come from the keyword rules in `businessos_core::assistant`, so
//! nothing here touches the network.

use businessos_core::assistant::{Assistant, Reply};

/// Who wrote a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// Signed-in user.
    User,
    /// Assistant reply.
    Assistant,
}

/// One conversation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Author.
    pub speaker: Speaker,
    /// Text shown.
    pub text: String,
    /// Matched topic of an assistant reply.
    pub topic: Option<String>,
}

const GREETING: &str = "Hi! Ask me about budgets, invoices, tasks, employees, documents \
or permissions.";

/// Chat panel of the assistant.
#[derive(Debug, Clone)]
pub struct AssistantView {
    assistant: Assistant,
    turns: Vec<Turn>,
}

impl Default for AssistantView {
    fn default() -> Self {
        Self::new(Assistant::default())
    }
}

impl AssistantView {
    /// Conversation opened with a greeting.
    #[must_use]
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            turns: vec![Turn {
                speaker: Speaker::Assistant,
                text: GREETING.to_string(),
                topic: None,
            }],
        }
    }

    /// Conversation so far, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Records the question and its answer. Blank input is ignored.
    pub fn ask(&mut self, question: &str) -> Option<Reply> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        let reply = self.assistant.reply(question);
        self.turns.push(Turn {
            speaker: Speaker::User,
            text: question.to_string(),
            topic: None,
        });
        self.turns.push(Turn {
            speaker: Speaker::Assistant,
            text: reply.text.clone(),
            topic: reply.topic.clone(),
        });
        Some(reply)
    }

    /// Starts over from the greeting.
    pub fn clear(&mut self) {
        self.turns.truncate(1);
    }
}
