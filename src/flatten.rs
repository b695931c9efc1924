//! Expansion of a user's licenses into report rows

use crate::models::{AssignedLicense, CapabilityStatus, User};
use crate::reference::ReferenceData;
use crate::report::{DetailedRow, ReportSink, SummaryRow};
use anyhow::Result;
use tracing::trace;

/// Label used in place of the service list when nothing is disabled
pub const ALL_SERVICES: &str = "All services";

/// Status of one of the SKU's service plans for this user
fn plan_status(user: &User, license: &AssignedLicense, service_plan_id: &str) -> CapabilityStatus {
    match user.find_plan(service_plan_id) {
        Some(plan) => plan.capability_status.clone(),
        None if license.is_plan_disabled(service_plan_id) => CapabilityStatus::Disabled,
        None => CapabilityStatus::Unknown,
    }
}

/// Enabled services of one license, as raw and friendly segments
struct LicenseSegment {
    raw: String,
    friendly: String,
}

fn flatten_license(
    user: &User,
    license: &AssignedLicense,
    refs: &ReferenceData,
    sink: &mut impl ReportSink,
) -> Result<LicenseSegment> {
    let sku_label = refs.sku_label(&license.sku_id);
    let sku_friendly = refs.license_friendly_name(sku_label);

    let mut enabled = Vec::new();
    let mut enabled_friendly = Vec::new();
    let mut disabled_count = 0usize;

    for plan in refs.service_plans(&license.sku_id) {
        let status = plan_status(user, license, &plan.service_plan_id);
        if status.is_disabled() {
            disabled_count += 1;
        } else {
            enabled.push(plan.service_plan_name.as_str());
            enabled_friendly.push(refs.service_friendly_name(&plan.service_plan_name));
        }

        sink.write_detailed(&DetailedRow {
            display_name: user.get_display_name().to_string(),
            user_principal_name: user.user_principal_name.clone(),
            license_plan: sku_label.to_string(),
            license_plan_friendly_name: sku_friendly.to_string(),
            service_id: plan.service_plan_id.clone(),
            service_name: plan.service_plan_name.clone(),
            provisioning_status: status.to_string(),
        })?;
    }

    trace!(
        "{}: {} enabled, {} disabled in {}",
        user.user_principal_name,
        enabled.len(),
        disabled_count,
        sku_label
    );

    let (services, friendly_services) = if disabled_count == 0 {
        (ALL_SERVICES.to_string(), ALL_SERVICES.to_string())
    } else {
        (enabled.join(","), enabled_friendly.join(","))
    };

    Ok(LicenseSegment {
        raw: format!("{sku_label}[{services}]"),
        friendly: format!("{sku_friendly}[{friendly_services}]"),
    })
}

/// Write a user's detailed rows and summary row to `sink`
pub fn flatten_user(user: &User, refs: &ReferenceData, sink: &mut impl ReportSink) -> Result<()> {
    let mut raw = Vec::with_capacity(user.assigned_licenses.len());
    let mut friendly = Vec::with_capacity(user.assigned_licenses.len());

    for license in &user.assigned_licenses {
        let segment = flatten_license(user, license, refs, sink)?;
        raw.push(segment.raw);
        friendly.push(segment.friendly);
    }

    sink.write_summary(&SummaryRow {
        display_name: user.get_display_name().to_string(),
        user_principal_name: user.user_principal_name.clone(),
        country: user.get_country().to_string(),
        licenses_with_enabled_services: raw.join("; "),
        friendly_licenses_with_enabled_services: friendly.join("; "),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{AssignedPlan, ServicePlanInfo, SubscribedSku};
    use crate::reference::FriendlyNames;
    use crate::report::CollectedRows;

    pub const E3: &str = "6fd2c87f-b296-42f0-b197-1e91e994b900";
    pub const FLOW: &str = "f30db892-07e9-47e9-837c-80727f46fd3d";

    pub fn reference_data() -> ReferenceData {
        let skus = vec![
            SubscribedSku {
                sku_id: E3.to_string(),
                sku_part_number: "ENTERPRISEPACK".to_string(),
                service_plans: [("a", "svcA"), ("b", "svcB"), ("c", "svcC")]
                    .iter()
                    .map(|(id, name)| ServicePlanInfo {
                        service_plan_id: id.to_string(),
                        service_plan_name: name.to_string(),
                    })
                    .collect(),
            },
            SubscribedSku {
                sku_id: FLOW.to_string(),
                sku_part_number: "FLOW_FREE".to_string(),
                service_plans: vec![ServicePlanInfo {
                    service_plan_id: "f".to_string(),
                    service_plan_name: "FLOW_P2_VIRAL".to_string(),
                }],
            },
        ];
        ReferenceData::new(
            skus,
            FriendlyNames::parse("ENTERPRISEPACK=Office 365 E3\nFLOW_FREE=Microsoft Power Automate Free"),
            FriendlyNames::parse("svcA=friendlyA\nsvcB=friendlyB\nsvcC=friendlyC"),
        )
    }

    pub fn user(name: &str, skus: &[&str], plans: &[(&str, &str)]) -> User {
        User {
            id: format!("id-{name}"),
            display_name: Some(name.to_string()),
            user_principal_name: format!("{}@contoso.com", name.to_lowercase().replace(' ', ".")),
            country: None,
            assigned_licenses: skus
                .iter()
                .map(|sku| AssignedLicense {
                    sku_id: sku.to_string(),
                    disabled_plans: Vec::new(),
                })
                .collect(),
            assigned_plans: plans
                .iter()
                .map(|(id, status)| AssignedPlan {
                    service_plan_id: id.to_string(),
                    capability_status: CapabilityStatus::from(status.to_string()),
                })
                .collect(),
        }
    }

    fn run(user: &User) -> CollectedRows {
        let mut rows = CollectedRows::default();
        flatten_user(user, &reference_data(), &mut rows).unwrap();
        rows
    }

    #[test]
    fn test_one_disabled_plan_lists_enabled_services() {
        let user = user(
            "Lee Gu",
            &[E3],
            &[("a", "Enabled"), ("b", "Enabled"), ("c", "Disabled")],
        );
        let rows = run(&user);

        let statuses: Vec<_> = rows
            .detailed
            .iter()
            .map(|row| (row.service_name.as_str(), row.provisioning_status.as_str()))
            .collect();
        assert_eq!(
            statuses,
            vec![("svcA", "Enabled"), ("svcB", "Enabled"), ("svcC", "Disabled")]
        );
        assert!(rows.detailed.iter().all(|row| {
            row.license_plan == "ENTERPRISEPACK" && row.license_plan_friendly_name == "Office 365 E3"
        }));

        assert_eq!(rows.summary.len(), 1);
        let summary = &rows.summary[0];
        assert_eq!(summary.licenses_with_enabled_services, "ENTERPRISEPACK[svcA,svcB]");
        assert_eq!(
            summary.friendly_licenses_with_enabled_services,
            "Office 365 E3[friendlyA,friendlyB]"
        );
        assert_eq!(summary.country, "-");
    }

    #[test]
    fn test_fully_enabled_sku_reads_all_services() {
        let user = user(
            "Nestor Wilke",
            &[E3, FLOW],
            &[("a", "Enabled"), ("b", "Warning"), ("c", "Enabled"), ("f", "Enabled")],
        );
        let rows = run(&user);

        assert_eq!(rows.detailed.len(), 4);
        assert_eq!(
            rows.summary[0].licenses_with_enabled_services,
            "ENTERPRISEPACK[All services]; FLOW_FREE[All services]"
        );
        assert_eq!(
            rows.summary[0].friendly_licenses_with_enabled_services,
            "Office 365 E3[All services]; Microsoft Power Automate Free[All services]"
        );
    }

    #[test]
    fn test_segments_follow_license_order() {
        let user = user("Pradeep Gupta", &[FLOW, E3], &[("c", "Disabled")]);
        let rows = run(&user);

        let segments: Vec<_> = rows.summary[0]
            .licenses_with_enabled_services
            .split("; ")
            .collect();
        assert_eq!(segments, vec!["FLOW_FREE[All services]", "ENTERPRISEPACK[svcA,svcB]"]);
        assert_eq!(rows.summary[0].friendly_licenses_with_enabled_services.split("; ").count(), 2);
    }

    #[test]
    fn test_unassigned_plan_is_unknown_and_enabled() {
        let user = user("Isaiah Langer", &[E3], &[("a", "Enabled"), ("b", "Disabled")]);
        let rows = run(&user);

        assert_eq!(rows.detailed[2].provisioning_status, "Unknown");
        assert_eq!(rows.summary[0].licenses_with_enabled_services, "ENTERPRISEPACK[svcA,svcC]");
    }

    #[test]
    fn test_license_disabled_plans_count_as_disabled() {
        let mut user = user("Johanna Lorenz", &[E3], &[("a", "Enabled"), ("b", "Enabled")]);
        user.assigned_licenses[0].disabled_plans = vec!["C".to_string()];
        let rows = run(&user);

        assert_eq!(rows.detailed[2].provisioning_status, "Disabled");
        assert_eq!(rows.summary[0].licenses_with_enabled_services, "ENTERPRISEPACK[svcA,svcB]");
    }

    #[test]
    fn test_unknown_sku_falls_back_to_raw_id() {
        let mut user = user("Grady Archie", &["0c266dff-15dd-4b49-8397-2bb16070ed52"], &[]);
        user.country = Some("Norway".to_string());
        let rows = run(&user);

        assert!(rows.detailed.is_empty());
        assert_eq!(
            rows.summary[0].licenses_with_enabled_services,
            "0c266dff-15dd-4b49-8397-2bb16070ed52[All services]"
        );
        assert_eq!(rows.summary[0].country, "Norway");
    }
}
