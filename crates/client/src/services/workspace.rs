//! Tasks, calendar, activity and chat services.

use async_trait::async_trait;
use businessos_core::activity::ActivityItem;
use businessos_core::calendar::{CalendarEvent, CalendarEventInput};
use businessos_core::chat::{ChatChannel, ChatMessage, NewMessage};
use businessos_core::ports::{ActivityApi, CalendarApi, ChatApi, TaskApi};
use businessos_core::tasks::{Task, TaskInput};
use businessos_shared::AppResult;
use businessos_shared::types::{ChannelId, EventId, TaskId};

use crate::http::ApiClient;

/// Tasks over REST.
#[derive(Debug, Clone)]
pub struct TaskService {
    api: ApiClient,
}

impl TaskService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskApi for TaskService {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.api.get("/api/tasks").await
    }

    async fn create_task(&self, input: &TaskInput) -> AppResult<Task> {
        self.api.post("/api/tasks", input).await
    }

    async fn update_task(&self, id: TaskId, input: &TaskInput) -> AppResult<Task> {
        self.api.put(&format!("/api/tasks/{id}"), input).await
    }

    async fn delete_task(&self, id: TaskId) -> AppResult<()> {
        self.api.delete(&format!("/api/tasks/{id}")).await
    }
}

/// Calendar events over REST.
#[derive(Debug, Clone)]
pub struct CalendarService {
    api: ApiClient,
}

impl CalendarService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CalendarApi for CalendarService {
    async fn list_events(&self) -> AppResult<Vec<CalendarEvent>> {
        self.api.get("/api/calendar/events").await
    }

    async fn create_event(&self, input: &CalendarEventInput) -> AppResult<CalendarEvent> {
        self.api.post("/api/calendar/events", input).await
    }

    async fn update_event(
        &self,
        id: EventId,
        input: &CalendarEventInput,
    ) -> AppResult<CalendarEvent> {
        self.api
            .put(&format!("/api/calendar/events/{id}"), input)
            .await
    }

    async fn delete_event(&self, id: EventId) -> AppResult<()> {
        self.api.delete(&format!("/api/calendar/events/{id}")).await
    }
}

/// Activity feed over REST.
#[derive(Debug, Clone)]
pub struct ActivityService {
    api: ApiClient,
}

impl ActivityService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ActivityApi for ActivityService {
    async fn list_activity(&self) -> AppResult<Vec<ActivityItem>> {
        self.api.get("/api/activity").await
    }
}

/// Team chat over REST.
#[derive(Debug, Clone)]
pub struct ChatService {
    api: ApiClient,
}

impl ChatService {
    /// Creates the service.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatApi for ChatService {
    async fn list_channels(&self) -> AppResult<Vec<ChatChannel>> {
        self.api.get("/api/chat/channels").await
    }

    async fn list_messages(&self, channel: ChannelId) -> AppResult<Vec<ChatMessage>> {
        self.api
            .get(&format!("/api/chat/channels/{channel}/messages"))
            .await
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        message: &NewMessage,
    ) -> AppResult<ChatMessage> {
        self.api
            .post(&format!("/api/chat/channels/{channel}/messages"), message)
            .await
    }
}
