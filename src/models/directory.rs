//! Tenant, caller and directory role models

use serde::Deserialize;

/// Tenant organization record
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// The signed-in principal
#[derive(Debug, Clone, Deserialize)]
pub struct Caller {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: Option<String>,

    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: Option<String>,
}

impl Caller {
    pub fn get_name(&self) -> &str {
        self.user_principal_name
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// An activated directory role
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryRole {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "roleTemplateId")]
    pub role_template_id: Option<String>,
}

/// Minimal directory object, as returned by membership listings
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryObject {
    #[serde(rename = "id")]
    pub id: String,
}
