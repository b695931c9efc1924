//! Directory user and license assignment models

use serde::Deserialize;
use std::fmt;

/// Directory user with its license assignments
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(rename = "id", default)]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: Option<String>,

    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: String,

    #[serde(rename = "country")]
    pub country: Option<String>,

    #[serde(rename = "assignedLicenses", default)]
    pub assigned_licenses: Vec<AssignedLicense>,

    #[serde(rename = "assignedPlans", default)]
    pub assigned_plans: Vec<AssignedPlan>,
}

impl User {
    pub fn get_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// Country, or "-" when missing or blank
    pub fn get_country(&self) -> &str {
        match self.country.as_deref().map(str::trim) {
            Some(country) if !country.is_empty() => country,
            _ => "-",
        }
    }

    pub fn is_licensed(&self) -> bool {
        !self.assigned_licenses.is_empty()
    }

    /// Find the user's provisioning entry for a service plan
    pub fn find_plan(&self, service_plan_id: &str) -> Option<&AssignedPlan> {
        self.assigned_plans
            .iter()
            .find(|plan| plan.service_plan_id.eq_ignore_ascii_case(service_plan_id))
    }
}

/// A SKU assigned to a user
#[derive(Debug, Clone, Deserialize)]
pub struct AssignedLicense {
    #[serde(rename = "skuId")]
    pub sku_id: String,

    #[serde(rename = "disabledPlans", default)]
    pub disabled_plans: Vec<String>,
}

impl AssignedLicense {
    pub fn is_plan_disabled(&self, service_plan_id: &str) -> bool {
        self.disabled_plans
            .iter()
            .any(|id| id.eq_ignore_ascii_case(service_plan_id))
    }
}

/// Per-service provisioning state for a user
#[derive(Debug, Clone, Deserialize)]
pub struct AssignedPlan {
    #[serde(rename = "servicePlanId")]
    pub service_plan_id: String,

    #[serde(rename = "capabilityStatus")]
    pub capability_status: CapabilityStatus,
}

/// Capability status of a service plan. Graph documents a fixed set of
/// values but may return others, which are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CapabilityStatus {
    Enabled,
    Disabled,
    Warning,
    Suspended,
    Deleted,
    LockedOut,
    /// No provisioning entry exists for the plan
    Unknown,
    Other(String),
}

impl CapabilityStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
            Self::Warning => "Warning",
            Self::Suspended => "Suspended",
            Self::Deleted => "Deleted",
            Self::LockedOut => "LockedOut",
            Self::Unknown => "Unknown",
            Self::Other(value) => value,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl From<String> for CapabilityStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Enabled" => Self::Enabled,
            "Disabled" => Self::Disabled,
            "Warning" => Self::Warning,
            "Suspended" => Self::Suspended,
            "Deleted" => Self::Deleted,
            "LockedOut" => Self::LockedOut,
            "Unknown" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
