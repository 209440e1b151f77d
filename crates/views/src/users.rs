//! User directory.

use std::sync::Arc;

use businessos_client::BlobStore;
use businessos_core::admin::{
    Profile, UpdateProfileInput, UserFilter, UserStatus, filter_users,
};
use businessos_core::ports::AdminApi;
use businessos_core::validate_input;
use businessos_shared::AppError;
use businessos_shared::types::UserId;

use crate::notify::Notifier;
use crate::scope::ViewScope;

/// State of the user directory.
pub struct UsersView {
    api: Arc<dyn AdminApi>,
    scope: ViewScope,
    users: Vec<Profile>,
    filter: UserFilter,
}

impl UsersView {
    /// Empty directory.
    pub fn new(api: Arc<dyn AdminApi>, notifier: Notifier) -> Self {
        Self {
            api,
            scope: ViewScope::new(notifier),
            users: Vec::new(),
            filter: UserFilter::default(),
        }
    }

    /// Lifetime of the page.
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Users as last fetched.
    pub fn users(&self) -> &[Profile] {
        &self.users
    }

    /// Mutable filter.
    pub fn filter_mut(&mut self) -> &mut UserFilter {
        &mut self.filter
    }

    /// Filtered users, sorted by name.
    pub fn visible(&self) -> Vec<Profile> {
        filter_users(&self.users, &self.filter)
    }

    /// Fetches the directory.
    pub async fn load(&mut self) -> bool {
        match self
            .scope
            .run("Failed to load users", self.api.list_users())
            .await
        {
            Some(users) => {
                self.users = users;
                true
            }
            None => false,
        }
    }

    /// Saves profile changes and re-fetches.
    pub async fn update(&mut self, id: UserId, input: UpdateProfileInput) -> bool {
        const TITLE: &str = "Failed to update user";
        if let Err(err) = validate_input(&input) {
            self.scope.notifier().failure(TITLE, &err);
            return false;
        }
        let Some(profile) = self.scope.run(TITLE, self.api.update_user(id, &input)).await else {
            return false;
        };
        self.scope
            .notifier()
            .success("User updated", format!("{} was saved", profile.name));
        self.load().await
    }

    /// Activates or deactivates a user and re-fetches.
    pub async fn set_status(&mut self, id: UserId, status: UserStatus) -> bool {
        let Some(profile) = self
            .scope
            .run("Failed to change status", self.api.set_user_status(id, status))
            .await
        else {
            return false;
        };
        let verb = match status {
            UserStatus::Active => "activated",
            UserStatus::Inactive => "deactivated",
        };
        self.scope
            .notifier()
            .success("Status changed", format!("{} was {verb}", profile.name));
        self.load().await
    }

    /// Stores a new avatar image, points the profile at its public URL and
    /// re-fetches.
    ///
    /// The image is deleted again when the profile update fails. Once
    /// started, both steps run to the end even if the view closes.
    pub async fn upload_avatar(
        &mut self,
        blobs: &BlobStore,
        id: UserId,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> bool {
        const TITLE: &str = "Failed to upload avatar";
        let api = &self.api;
        let upload = async {
            let stored = blobs
                .upload_avatar(id, filename, content_type, data)
                .await
                .map_err(AppError::from)?;
            let input = UpdateProfileInput {
                avatar_url: Some(blobs.public_url(&stored.key)),
                ..UpdateProfileInput::default()
            };
            match api.update_user(id, &input).await {
                Ok(profile) => Ok(profile),
                Err(err) => {
                    blobs.discard(&stored.key).await;
                    Err(err)
                }
            }
        };
        let Some(profile) = self.scope.run_to_end(TITLE, upload).await else {
            return false;
        };
        self.scope
            .notifier()
            .success("Avatar updated", format!("{} has a new avatar", profile.name));
        self.load().await
    }

    /// Closes the page.
    pub fn close(&self) {
        self.scope.close();
    }
}
