//! Data models for Microsoft Graph directory objects

mod directory;
pub(crate) mod odata;
mod sku;
mod user;

pub use directory::{Caller, DirectoryObject, DirectoryRole, Organization};
pub use odata::ODataResponse;
pub use sku::{ServicePlanInfo, SubscribedSku};
pub use user::{AssignedLicense, CapabilityStatus, User};
#[cfg(test)]
pub use user::AssignedPlan;
