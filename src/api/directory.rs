//! Tenant, caller and directory role endpoints

use super::GraphClient;
use crate::models::{Caller, DirectoryObject, DirectoryRole, Organization};
use anyhow::{Context, Result};

impl GraphClient {
    /// Get the organization record of the signed-in tenant
    pub async fn get_organization(&self) -> Result<Organization> {
        let orgs: Vec<Organization> = self.get_all("organization?$select=id,displayName").await?;
        orgs.into_iter()
            .next()
            .context("Microsoft Graph returned no organization for this session")
    }

    /// Get the signed-in user
    pub async fn get_me(&self) -> Result<Caller> {
        self.get_json("me?$select=id,displayName,userPrincipalName")
            .await
    }

    /// Get activated directory roles
    pub async fn get_directory_roles(&self) -> Result<Vec<DirectoryRole>> {
        self.get_all("directoryRoles?$select=id,displayName,roleTemplateId")
            .await
    }

    /// Get members of a directory role
    pub async fn get_role_members(&self, role_id: &str) -> Result<Vec<DirectoryObject>> {
        let endpoint = format!("directoryRoles/{}/members?$select=id", role_id);
        self.get_all(&endpoint).await
    }
}
