//! Selection of the users to report on

use crate::api::Directory;
use crate::models::User;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Header of the single-column input list
pub const DISPLAY_NAME_COLUMN: &str = "DisplayName";

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(rename = "DisplayName")]
    display_name: String,
}

/// Read the display names listed in a CSV file, skipping blank rows
pub fn read_display_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open user list {}", path.display()))?;

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h.trim_start_matches('\u{feff}') == DISPLAY_NAME_COLUMN) {
        anyhow::bail!(
            "User list {} has no '{}' column",
            path.display(),
            DISPLAY_NAME_COLUMN
        );
    }
    if headers.get(0).is_some_and(|h| h.starts_with('\u{feff}')) {
        let cleaned: csv::StringRecord = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}'))
            .collect();
        reader.set_headers(cleaned);
    }

    let mut names = Vec::new();
    for (idx, row) in reader.deserialize::<InputRow>().enumerate() {
        let row = row.with_context(|| format!("Invalid row {} in {}", idx + 2, path.display()))?;
        if !row.display_name.is_empty() {
            names.push(row.display_name);
        }
    }
    Ok(names)
}

/// Which users the report covers
pub enum Selection<'a> {
    /// Users named in a CSV file
    Listed(&'a Path),
    /// Every user in the directory
    All,
}

/// Fetch the selected users and keep the licensed ones
pub async fn select_users(directory: &impl Directory, selection: Selection<'_>) -> Result<Vec<User>> {
    let users = match selection {
        Selection::Listed(path) => {
            let names = read_display_names(path)?;
            debug!("Resolving {} listed users", names.len());
            resolve_display_names(directory, &names).await?
        }
        Selection::All => directory
            .users()
            .await
            .context("Failed to list directory users")?,
    };

    let total = users.len();
    let licensed: Vec<User> = users.into_iter().filter(User::is_licensed).collect();
    debug!("{} of {} users hold a license", licensed.len(), total);
    Ok(licensed)
}

async fn resolve_display_names(directory: &impl Directory, names: &[String]) -> Result<Vec<User>> {
    let mut users = Vec::with_capacity(names.len());
    for name in names {
        let matches = directory
            .users_by_display_name(name)
            .await
            .with_context(|| format!("Failed to look up user '{}'", name))?;
        match matches.len() {
            0 => warn!("No directory user named '{}'; skipping", name),
            1 => {}
            n => {
                let ids: Vec<&str> = matches.iter().map(|user| user.id.as_str()).collect();
                warn!(
                    "{} directory users are named '{}' ({}); reporting all of them",
                    n,
                    name,
                    ids.join(", ")
                );
            }
        }
        users.extend(matches);
    }
    Ok(users)
}
