//! Azure CLI credential provider for Microsoft Graph authentication

use crate::error::LicenseReportError;
use anyhow::Result;
use azure_core::credentials::TokenCredential;
use azure_identity::AzureCliCredential;
use std::sync::Arc;
use tracing::debug;

/// Scope requested for every Graph token
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Authenticator that uses Azure CLI credentials to access Microsoft Graph
pub struct AzureAuthenticator {
    credential: Arc<AzureCliCredential>,
    tenant_id: Option<String>,
}

impl AzureAuthenticator {
    /// Create a new authenticator
    ///
    /// # Arguments
    /// * `tenant_id` - Tenant the session is expected to belong to, if any
    pub fn new(tenant_id: Option<String>) -> Result<Self> {
        let tenant_id = tenant_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let credential = AzureCliCredential::new().map_err(|err| {
            debug!("Azure CLI credential error: {err}");
            LicenseReportError::Authentication {
                hint: login_hint(tenant_id.as_deref()),
            }
        })?;

        Ok(Self {
            credential,
            tenant_id,
        })
    }

    /// Get an access token for Microsoft Graph
    pub async fn get_token(&self) -> Result<String> {
        let token = self
            .credential
            .get_token(&[GRAPH_SCOPE])
            .await
            .map_err(|err| {
                debug!("Token acquisition failed: {err}");
                LicenseReportError::Authentication {
                    hint: login_hint(self.tenant_id.as_deref()),
                }
            })?;

        Ok(token.token.secret().to_string())
    }

    /// The tenant requested on the command line or in the config file
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Test if authentication is working
    pub async fn test_connection(&self) -> Result<()> {
        self.get_token().await?;
        Ok(())
    }
}

fn login_hint(tenant_id: Option<&str>) -> String {
    tenant_id
        .map(|id| format!(" --tenant {id}"))
        .unwrap_or_default()
}
