//! User and subscribed SKU endpoints

use super::GraphClient;
use crate::models::{SubscribedSku, User};
use anyhow::Result;

const USER_SELECT: &str =
    "$select=id,displayName,userPrincipalName,country,assignedLicenses,assignedPlans";

impl GraphClient {
    /// Get every SKU the tenant has acquired
    pub async fn get_subscribed_skus(&self) -> Result<Vec<SubscribedSku>> {
        self.get_all("subscribedSkus?$select=skuId,skuPartNumber,servicePlans")
            .await
    }

    /// Get all users with their license assignments
    pub async fn get_users(&self) -> Result<Vec<User>> {
        let endpoint = format!("users?{}&$top=999", USER_SELECT);
        self.get_all(&endpoint).await
    }

    /// Get users whose display name equals `display_name` exactly
    pub async fn get_users_by_display_name(&self, display_name: &str) -> Result<Vec<User>> {
        let endpoint = format!(
            "users?$filter={}&{}",
            urlencoding::encode(&display_name_filter(display_name)),
            USER_SELECT
        );
        self.get_all(&endpoint).await
    }
}

/// OData filter matching a display name, with single quotes doubled
pub(crate) fn display_name_filter(display_name: &str) -> String {
    format!("displayName eq '{}'", display_name.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_filter_escapes_quotes() {
        assert_eq!(
            display_name_filter("Patrick O'Brien"),
            "displayName eq 'Patrick O''Brien'"
        );
        assert_eq!(
            urlencoding::encode(&display_name_filter("R&D Bot")),
            "displayName%20eq%20%27R%26D%20Bot%27"
        );
    }
}
