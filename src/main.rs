//! Licenso - Microsoft 365 user license reporter
//!
//! Reads license assignments from Microsoft Graph and writes two CSV reports:
//! - a detailed export with one row per user, license and service plan
//! - a summary with one row per user listing the enabled services

mod access;
mod api;
mod auth;
mod config;
mod error;
mod flatten;
mod models;
mod preflight;
mod reference;
mod report;
mod selector;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{Directory, GraphClient};
use crate::auth::AzureAuthenticator;
use crate::config::Config;
use crate::reference::ReferenceData;
use crate::report::CsvReport;
use crate::selector::Selection;

/// Licenso - Microsoft 365 license report
#[derive(Parser, Debug)]
#[command(name = "licenso")]
#[command(about = "Export Microsoft 365 user licenses and enabled services to CSV")]
#[command(version)]
struct Args {
    /// CSV file with a DisplayName column listing the users to report on
    #[arg(short, long, env = "LICENSO_INPUT")]
    input: Option<PathBuf>,

    /// Tenant to sign in to (overrides tenant_id in config.toml)
    #[arg(short, long, env = "LICENSO_TENANT_ID")]
    tenant_id: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging (set RUST_LOG=debug for request traces)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            error::exit_code_for(&err)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load()
        .context("Failed to load configuration")?
        .with_tenant(args.tenant_id);

    // Pre-flight checks
    let elevated = preflight::is_elevated();
    info!("Running with administrator rights: {}", elevated);
    preflight::require_elevated(elevated)?;
    preflight::ensure_azure_cli(&mut io::stdin().lock(), &mut io::stderr())?;

    // Sign in and check the caller may read the directory
    let authenticator = Arc::new(AzureAuthenticator::new(config.tenant_id.clone())?);
    eprintln!("Connecting to Microsoft Graph...");
    authenticator.test_connection().await?;
    let client = GraphClient::new(authenticator)?;
    access::verify_tenant(&client, client.authenticator().tenant_id()).await?;
    access::verify_directory_role(&client).await?;
    eprintln!("Connected successfully!");

    // Reference data
    let (license_names, service_names) = reference::load_friendly_names(&config)?;
    let skus = client
        .subscribed_skus()
        .await
        .context("Failed to list subscribed SKUs")?;
    let refs = ReferenceData::new(skus, license_names, service_names);
    info!("Loaded {} subscribed SKUs", refs.sku_count());

    // Users
    let selection = match args.input.as_deref() {
        Some(path) => Selection::Listed(path),
        None => Selection::All,
    };
    let users = selector::select_users(&client, selection).await?;

    // Reports
    let mut report = CsvReport::create(&config.output_dir(), Local::now())?;
    let mut processed = 0usize;
    for user in &users {
        flatten::flatten_user(user, &refs, &mut report)
            .with_context(|| format!("Failed to report on {}", user.user_principal_name))?;
        processed += 1;
        write_progress(&mut io::stderr(), processed, users.len())?;
    }

    eprintln!("Detailed report: {}", report.detailed_path().display());
    eprintln!("Summary report:  {}", report.summary_path().display());
    Ok(())
}

/// One whole progress line per user, so log output never lands mid-line
fn write_progress(out: &mut impl Write, processed: usize, total: usize) -> io::Result<()> {
    writeln!(out, "Processed {}/{} licensed users", processed, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_written_as_whole_lines() {
        let mut out = Vec::new();
        write_progress(&mut out, 1, 2).unwrap();
        write_progress(&mut out, 2, 2).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains('\r'));
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["Processed 1/2 licensed users", "Processed 2/2 licensed users"]
        );
    }
}
