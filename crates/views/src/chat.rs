//! Team chat.

use std::sync::Arc;

use businessos_core::chat::{ChatChannel, ChatMessage, NewMessage, thread};
use businessos_core::ports::ChatApi;
use businessos_core::validate_input;
use businessos_shared::types::ChannelId;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// Channel list plus the open channel's thread.
pub struct ChatView {
    api: Arc<dyn ChatApi>,
    scope: ViewScope,
    channels: Vec<ChatChannel>,
    selected: Option<ChannelId>,
    messages: Vec<ChatMessage>,
}

impl ChatView {
    /// No channels, nothing open.
    pub fn new(api: Arc<dyn ChatApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            channels: Vec::new(),
            selected: None,
            messages: Vec::new(),
        }
    }

    /// Lifetime of the chat panel.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Known channels.
    pub fn channels(&self) -> &[ChatChannel] {
        &self.channels
    }

    /// Open channel.
    pub fn selected(&self) -> Option<&ChatChannel> {
        self.selected
            .and_then(|id| self.channels.iter().find(|c| c.id == id))
    }

    /// Messages of the open channel in send order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Fetches channels and opens the first one if none is open.
    pub async fn load(&mut self) -> bool {
        let Some(channels) = self
            .scope
            .run("Failed to load channels", self.api.list_channels())
            .await
        else {
            return false;
        };
        self.channels = channels;
        match self.selected.or_else(|| self.channels.first().map(|c| c.id)) {
            Some(id) => self.open(id).await,
            None => true,
        }
    }

    /// Opens a channel and fetches its messages.
    ///
    /// The previous thread stays visible if the fetch fails.
    pub async fn open(&mut self, channel: ChannelId) -> bool {
        let Some(messages) = self
            .scope
            .run("Failed to load messages", self.api.list_messages(channel))
            .await
        else {
            return false;
        };
        self.selected = Some(channel);
        self.messages = thread(&messages);
        true
    }

    /// Posts to the open channel and re-fetches its thread.
    pub async fn send(&mut self, body: &str) -> bool {
        const TITLE: &str = "Failed to send message";
        let Some(channel) = self.selected else {
            self.scope
                .notifier()
                .info("No channel selected", "Pick a channel first");
            return false;
        };
        let message = NewMessage {
            body: body.trim().to_string(),
        };
        if let Err(err) = validate_input(&message) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        if self
            .scope
            .run(TITLE, self.api.send_message(channel, &message))
            .await
            .is_none()
        {
            return false;
        }
        self.open(channel).await
    }

    /// Closes the panel.
    pub fn close(&self) {
        self.scope.close();
    }
}
