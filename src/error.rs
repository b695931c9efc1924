//! Fatal precondition errors and their exit codes

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Errors that stop the report before or while it runs
#[derive(Debug, Error)]
pub enum LicenseReportError {
    #[error("administrator rights are required; re-run from an elevated prompt or as root")]
    NotElevated,

    #[error("the Azure CLI is not installed: {0}")]
    AzureCliMissing(String),

    #[error("the Azure CLI is required and installation was declined")]
    InstallDeclined,

    #[error("authentication failed. Sign in with 'az login'{hint}")]
    Authentication { hint: String },

    #[error("signed in to tenant {actual}, expected {expected}. Run 'az login --tenant {expected}'")]
    TenantMismatch { expected: String, actual: String },

    #[error("{caller} is not a member of any of: {required}")]
    InsufficientRole { caller: String, required: String },

    #[error("friendly name file {} not found or unreadable", path.display())]
    MissingResource { path: PathBuf },
}

impl LicenseReportError {
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::NotElevated => 2,
            Self::AzureCliMissing(_) | Self::InstallDeclined => 3,
            Self::Authentication { .. } | Self::TenantMismatch { .. } => 4,
            Self::InsufficientRole { .. } => 5,
            Self::MissingResource { .. } => 6,
        };
        ExitCode::from(code)
    }
}

/// Exit code for any error surfaced from the run
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<LicenseReportError>())
        .map(LicenseReportError::exit_code)
        .unwrap_or(ExitCode::FAILURE)
}
