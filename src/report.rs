//! Report rows and CSV output

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const DETAILED_REPORT_PREFIX: &str = "DetailedO365UserLicenseReport";
pub const SUMMARY_REPORT_PREFIX: &str = "SimpleO365UserLicenseReport";

/// One row per (user, SKU, service plan)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRow {
    #[serde(rename = "DisplayName")]
    pub display_name: String,

    #[serde(rename = "UserPrincipalName")]
    pub user_principal_name: String,

    #[serde(rename = "LicensePlan")]
    pub license_plan: String,

    #[serde(rename = "FriendlyNameofLicensePlan")]
    pub license_plan_friendly_name: String,

    #[serde(rename = "ServiceId")]
    pub service_id: String,

    #[serde(rename = "ServiceName")]
    pub service_name: String,

    #[serde(rename = "ProvisioningStatus")]
    pub provisioning_status: String,
}

/// One row per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "DisplayName")]
    pub display_name: String,

    #[serde(rename = "UserPrincipalName")]
    pub user_principal_name: String,

    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "LicensePlanWithEnabledService")]
    pub licenses_with_enabled_services: String,

    #[serde(rename = "FriendlyNameOfLicensePlanAndEnabledService")]
    pub friendly_licenses_with_enabled_services: String,
}

/// Destination for report rows as they are produced
pub trait ReportSink {
    fn write_detailed(&mut self, row: &DetailedRow) -> Result<()>;
    fn write_summary(&mut self, row: &SummaryRow) -> Result<()>;
}

/// Rows kept in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectedRows {
    pub detailed: Vec<DetailedRow>,
    pub summary: Vec<SummaryRow>,
}

#[cfg(test)]
impl ReportSink for CollectedRows {
    fn write_detailed(&mut self, row: &DetailedRow) -> Result<()> {
        self.detailed.push(row.clone());
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> Result<()> {
        self.summary.push(row.clone());
        Ok(())
    }
}

/// Append-mode CSV writer flushing every row
struct CsvFile {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvFile {
    fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let is_empty = file
            .metadata()
            .with_context(|| format!("Failed to inspect {}", path.display()))?
            .len()
            == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        Ok(Self { path, writer })
    }

    fn write<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.writer
            .serialize(row)
            .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(())
    }
}

/// The detailed and summary CSV reports of one run
pub struct CsvReport {
    detailed: CsvFile,
    summary: CsvFile,
}

impl CsvReport {
    /// Open both reports in `dir`, named after `timestamp`
    pub fn create(dir: &Path, timestamp: DateTime<Local>) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let stamp = timestamp.format("%Y-%m-%d_%H-%M-%S");

        Ok(Self {
            detailed: CsvFile::open(dir.join(format!("{DETAILED_REPORT_PREFIX}_{stamp}.csv")))?,
            summary: CsvFile::open(dir.join(format!("{SUMMARY_REPORT_PREFIX}_{stamp}.csv")))?,
        })
    }

    pub fn detailed_path(&self) -> &Path {
        &self.detailed.path
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary.path
    }
}

impl ReportSink for CsvReport {
    fn write_detailed(&mut self, row: &DetailedRow) -> Result<()> {
        self.detailed.write(row)
    }

    fn write_summary(&mut self, row: &SummaryRow) -> Result<()> {
        self.summary.write(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn summary(name: &str) -> SummaryRow {
        SummaryRow {
            display_name: name.to_string(),
            user_principal_name: "megan@contoso.com".to_string(),
            country: "-".to_string(),
            licenses_with_enabled_services: "ENTERPRISEPACK[All services]; FLOW_FREE[All services]"
                .to_string(),
            friendly_licenses_with_enabled_services:
                "Office 365 E3[All services]; Microsoft Power Automate Free[All services]".to_string(),
        }
    }

    #[test]
    fn test_report_file_names_and_headers() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = Local.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap();
        let mut report = CsvReport::create(dir.path(), stamp).unwrap();

        report
            .write_detailed(&DetailedRow {
                display_name: "Bowen, Megan".to_string(),
                user_principal_name: "megan@contoso.com".to_string(),
                license_plan: "ENTERPRISEPACK".to_string(),
                license_plan_friendly_name: "Office 365 E3".to_string(),
                service_id: "efb87545-963c-4e0d-99df-69c6916d9eb0".to_string(),
                service_name: "EXCHANGE_S_ENTERPRISE".to_string(),
                provisioning_status: "Enabled".to_string(),
            })
            .unwrap();
        report.write_summary(&summary("Megan Bowen")).unwrap();

        assert_eq!(
            report.detailed_path(),
            dir.path().join("DetailedO365UserLicenseReport_2026-03-14_09-05-00.csv")
        );
        let detailed = fs::read_to_string(report.detailed_path()).unwrap();
        assert_eq!(
            detailed,
            "DisplayName,UserPrincipalName,LicensePlan,FriendlyNameofLicensePlan,ServiceId,ServiceName,ProvisioningStatus\n\
             \"Bowen, Megan\",megan@contoso.com,ENTERPRISEPACK,Office 365 E3,efb87545-963c-4e0d-99df-69c6916d9eb0,EXCHANGE_S_ENTERPRISE,Enabled\n"
        );

        let simple = fs::read_to_string(report.summary_path()).unwrap();
        let mut lines = simple.lines();
        assert_eq!(
            lines.next(),
            Some("DisplayName,UserPrincipalName,Country,LicensePlanWithEnabledService,FriendlyNameOfLicensePlanAndEnabledService")
        );
        assert_eq!(
            lines.next(),
            Some("Megan Bowen,megan@contoso.com,-,ENTERPRISEPACK[All services]; FLOW_FREE[All services],Office 365 E3[All services]; Microsoft Power Automate Free[All services]")
        );
    }

    #[test]
    fn test_append_does_not_repeat_header() {
        let dir = tempfile::tempdir().unwrap();
        let stamp = Local.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap();

        for name in ["Alex Wilber", "Diego Siciliani"] {
            let mut report = CsvReport::create(dir.path(), stamp).unwrap();
            report.write_summary(&summary(name)).unwrap();
        }

        let path = dir
            .path()
            .join("SimpleO365UserLicenseReport_2026-03-14_09-05-00.csv");
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("DisplayName").count(), 1);
    }
}
