//! API module for Microsoft Graph interactions

mod client;
mod directory;
mod users;

pub use client::GraphClient;

use crate::models::{Caller, DirectoryObject, DirectoryRole, Organization, SubscribedSku, User};
use anyhow::Result;

/// Read-only view of the directory the report is built from
#[allow(async_fn_in_trait)]
pub trait Directory {
    async fn organization(&self) -> Result<Organization>;
    async fn me(&self) -> Result<Caller>;
    async fn directory_roles(&self) -> Result<Vec<DirectoryRole>>;
    async fn role_members(&self, role_id: &str) -> Result<Vec<DirectoryObject>>;
    async fn subscribed_skus(&self) -> Result<Vec<SubscribedSku>>;
    async fn users(&self) -> Result<Vec<User>>;
    async fn users_by_display_name(&self, display_name: &str) -> Result<Vec<User>>;
}

impl Directory for GraphClient {
    async fn organization(&self) -> Result<Organization> {
        self.get_organization().await
    }

    async fn me(&self) -> Result<Caller> {
        self.get_me().await
    }

    async fn directory_roles(&self) -> Result<Vec<DirectoryRole>> {
        self.get_directory_roles().await
    }

    async fn role_members(&self, role_id: &str) -> Result<Vec<DirectoryObject>> {
        self.get_role_members(role_id).await
    }

    async fn subscribed_skus(&self) -> Result<Vec<SubscribedSku>> {
        self.get_subscribed_skus().await
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.get_users().await
    }

    async fn users_by_display_name(&self, display_name: &str) -> Result<Vec<User>> {
        self.get_users_by_display_name(display_name).await
    }
}
