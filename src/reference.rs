//! Reference data: tenant SKUs and friendly-name tables

use crate::config::Config;
use crate::error::LicenseReportError;
use crate::models::{ServicePlanInfo, SubscribedSku};
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LICENSE_NAMES_FILE: &str = "LicenseFriendlyName.txt";
pub const SERVICE_NAMES_FILE: &str = "ServiceFriendlyName.txt";

/// Lookup table from a raw identifier to a display label
#[derive(Debug, Clone, Default)]
pub struct FriendlyNames {
    names: HashMap<String, String>,
}

impl FriendlyNames {
    /// Parse `key=value` lines. Blank lines and `#` comments are skipped,
    /// and a line without `=` maps the name to itself.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| match line.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
                }
                None => Some((line.to_string(), line.to_string())),
            })
            .collect();
        Self { names }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            debug!("Reading {} failed: {}", path.display(), err);
            LicenseReportError::MissingResource {
                path: path.to_path_buf(),
            }
        })?;
        let table = Self::parse(content.trim_start_matches('\u{feff}'));
        debug!("Loaded {} friendly names from {}", table.len(), path.display());
        Ok(table)
    }

    /// Label for `raw`, or `raw` itself when the table has no entry
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.names.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Everything the flattener needs besides the user record
#[derive(Debug, Clone)]
pub struct ReferenceData {
    skus: Vec<SubscribedSku>,
    sku_part_numbers: HashMap<String, String>,
    license_names: FriendlyNames,
    service_names: FriendlyNames,
}

impl ReferenceData {
    pub fn new(
        skus: Vec<SubscribedSku>,
        license_names: FriendlyNames,
        service_names: FriendlyNames,
    ) -> Self {
        let sku_part_numbers = skus
            .iter()
            .map(|sku| (sku.sku_id.to_ascii_lowercase(), sku.sku_part_number.clone()))
            .collect();
        Self {
            skus,
            sku_part_numbers,
            license_names,
            service_names,
        }
    }

    /// SKU part number for a SKU id, falling back to the raw id
    pub fn sku_label<'a>(&'a self, sku_id: &'a str) -> &'a str {
        self.sku_part_numbers
            .get(&sku_id.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or(sku_id)
    }

    pub fn license_friendly_name<'a>(&'a self, sku_label: &'a str) -> &'a str {
        self.license_names.resolve(sku_label)
    }

    pub fn service_friendly_name<'a>(&'a self, service_plan_name: &'a str) -> &'a str {
        self.service_names.resolve(service_plan_name)
    }

    /// Service plans of a SKU, in the order the tenant returned them
    pub fn service_plans(&self, sku_id: &str) -> &[ServicePlanInfo] {
        self.skus
            .iter()
            .find(|sku| sku.sku_id.eq_ignore_ascii_case(sku_id))
            .map(|sku| sku.service_plans.as_slice())
            .unwrap_or(&[])
    }

    pub fn sku_count(&self) -> usize {
        self.skus.len()
    }
}

/// Locate a friendly-name file. A configured path is used as is; otherwise
/// the file is looked up next to the executable, in the working directory
/// and in `resources/`.
pub fn resolve_resource(configured: Option<&Path>, file_name: &str) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }

    let mut candidates = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(file_name));
    }
    candidates.push(PathBuf::from(file_name));
    candidates.push(Path::new("resources").join(file_name));

    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Load both friendly-name tables as configured
pub fn load_friendly_names(config: &Config) -> Result<(FriendlyNames, FriendlyNames)> {
    let license_path = resolve_resource(config.license_names.as_deref(), LICENSE_NAMES_FILE);
    let service_path = resolve_resource(config.service_names.as_deref(), SERVICE_NAMES_FILE);
    Ok((
        FriendlyNames::load(&license_path)?,
        FriendlyNames::load(&service_path)?,
    ))
}
