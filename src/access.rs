//! Tenant and directory role checks for the signed-in caller

use crate::api::Directory;
use crate::error::LicenseReportError;
use crate::models::Organization;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Directory roles allowed to run the report
pub const REQUIRED_ROLES: [&str; 2] = ["Global Administrator", "Global Reader"];

/// Role template ids of [`REQUIRED_ROLES`]; they do not change across tenants
const REQUIRED_ROLE_TEMPLATES: [&str; 2] = [
    "62e90394-69f5-4237-9190-012177145e10",
    "f2ef992c-3afb-46b9-b7cf-a126ee74c451",
];

/// Confirm the session belongs to `tenant_id`, when one was requested.
/// Tenant ids are GUIDs; a domain name cannot be compared and only gets logged.
pub async fn verify_tenant(directory: &impl Directory, tenant_id: Option<&str>) -> Result<Organization> {
    let org = directory
        .organization()
        .await
        .context("Failed to read the organization of the signed-in tenant")?;
    info!(
        "Signed in to tenant {} ({})",
        org.display_name.as_deref().unwrap_or("unnamed"),
        org.id
    );

    if let Some(expected) = tenant_id {
        if is_guid(expected) && !expected.eq_ignore_ascii_case(&org.id) {
            return Err(LicenseReportError::TenantMismatch {
                expected: expected.to_string(),
                actual: org.id.clone(),
            }
            .into());
        }
        if !is_guid(expected) {
            debug!("Tenant '{}' is not an id; skipping tenant match", expected);
        }
    }

    Ok(org)
}

fn is_guid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Confirm the caller is a member of one of [`REQUIRED_ROLES`]
pub async fn verify_directory_role(directory: &impl Directory) -> Result<()> {
    let caller = directory
        .me()
        .await
        .context("Failed to resolve the signed-in user")?;

    let roles = directory
        .directory_roles()
        .await
        .context("Failed to list directory roles")?;

    for role in roles.iter().filter(|role| {
        REQUIRED_ROLES.contains(&role.display_name.as_str())
            || role
                .role_template_id
                .as_deref()
                .is_some_and(|id| REQUIRED_ROLE_TEMPLATES.contains(&id))
    }) {
        let members = directory
            .role_members(&role.id)
            .await
            .with_context(|| format!("Failed to list members of {}", role.display_name))?;
        if members.iter().any(|member| member.id == caller.id) {
            info!("{} holds the {} role", caller.get_name(), role.display_name);
            return Ok(());
        }
    }

    Err(LicenseReportError::InsufficientRole {
        caller: caller.get_name().to_string(),
        required: REQUIRED_ROLES.join(", "),
    }
    .into())
}
