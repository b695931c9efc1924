//! Subscribed SKU models

use serde::Deserialize;

/// A license SKU the tenant has acquired
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribedSku {
    #[serde(rename = "skuId")]
    pub sku_id: String,

    #[serde(rename = "skuPartNumber")]
    pub sku_part_number: String,

    #[serde(rename = "servicePlans", default)]
    pub service_plans: Vec<ServicePlanInfo>,
}

/// A service bundled in a SKU
#[derive(Debug, Clone, Deserialize)]
pub struct ServicePlanInfo {
    #[serde(rename = "servicePlanId")]
    pub service_plan_id: String,

    #[serde(rename = "servicePlanName")]
    pub service_plan_name: String,
}
