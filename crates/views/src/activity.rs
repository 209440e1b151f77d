//! Recent-activity feed.

use std::sync::Arc;

use businessos_core::activity::{ActivityFilter, ActivityItem, feed};
use businessos_core::ports::ActivityApi;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// Dashboard activity widget.
pub struct ActivityView {
    api: Arc<dyn ActivityApi>,
    scope: ViewScope,
    items: Vec<ActivityItem>,
    filter: ActivityFilter,
}

impl ActivityView {
    /// Empty feed.
    pub fn new(api: Arc<dyn ActivityApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            items: Vec::new(),
            filter: ActivityFilter::default(),
        }
    }

    /// Lifetime of the widget.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Mutable filter.
    pub fn filter_mut(&mut self) -> &mut ActivityFilter {
        &mut self.filter
    }

    /// Filtered entries, newest first, at most `limit`.
    pub fn visible(&self, limit: usize) -> Vec<ActivityItem> {
        let mut items = feed(&self.items, &self.filter);
        items.truncate(limit);
        items
    }

    /// Fetches the feed.
    pub async fn load(&mut self) -> bool {
        let Some(items) = self
            .scope
            .run("Failed to load activity", self.api.list_activity())
            .await
        else {
            return false;
        };
        self.items = items;
        true
    }

    /// Closes the widget.
    pub fn close(&self) {
        self.scope.close();
    }
}
