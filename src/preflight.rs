//! Local pre-flight checks: privilege and the Azure CLI

use crate::error::LicenseReportError;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};
use tracing::{debug, info};

const AZURE_CLI_INSTALL_DOCS: &str = "https://learn.microsoft.com/cli/azure/install-azure-cli";

/// Whether a command runs to a successful exit, with output discarded
fn succeeds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Whether the process runs as Administrator (Windows) or root (Unix)
#[cfg(windows)]
pub fn is_elevated() -> bool {
    // `net session` is refused without administrator rights
    succeeds("net", &["session"])
}

/// Whether the process runs as Administrator (Windows) or root (Unix)
#[cfg(not(windows))]
pub fn is_elevated() -> bool {
    Command::new("id")
        .arg("-u")
        .output()
        .map(|out| out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "0")
        .unwrap_or(false)
}

/// Stop unless the process runs elevated
pub fn require_elevated(elevated: bool) -> Result<()> {
    if !elevated {
        return Err(LicenseReportError::NotElevated.into());
    }
    Ok(())
}

/// Whether the Azure CLI can be run
pub fn azure_cli_available() -> bool {
    let available = succeeds(azure_cli_program(), &["version"]);
    debug!("Azure CLI available: {}", available);
    available
}

fn azure_cli_program() -> &'static str {
    if cfg!(windows) { "az.cmd" } else { "az" }
}

/// Ask a yes/no question, defaulting to no
pub fn confirm(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read answer")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Make sure the Azure CLI is installed, offering to install it when it is not.
/// Callers check elevation first; the installer needs it.
pub fn ensure_azure_cli(input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    if azure_cli_available() {
        return Ok(());
    }

    writeln!(output, "The Azure CLI is required to sign in to Microsoft Graph.")?;
    if !confirm("Install the Azure CLI now?", input, output)? {
        return Err(LicenseReportError::InstallDeclined.into());
    }

    install_azure_cli()?;
    if !azure_cli_available() {
        return Err(LicenseReportError::AzureCliMissing(
            "installation finished but 'az' is not on PATH yet; open a new terminal".to_string(),
        )
        .into());
    }
    Ok(())
}

#[cfg(windows)]
fn install_azure_cli() -> Result<()> {
    info!("Installing the Azure CLI with winget");
    let status = Command::new("winget")
        .args(["install", "--exact", "--id", "Microsoft.AzureCLI", "--silent"])
        .status()
        .context("Failed to run winget")?;
    if !status.success() {
        return Err(LicenseReportError::AzureCliMissing(format!(
            "winget exited with {}; see {}",
            status, AZURE_CLI_INSTALL_DOCS
        ))
        .into());
    }
    Ok(())
}

#[cfg(not(windows))]
fn install_azure_cli() -> Result<()> {
    info!("No automatic Azure CLI installer for this platform");
    Err(LicenseReportError::AzureCliMissing(format!(
        "install it with your package manager, see {}",
        AZURE_CLI_INSTALL_DOCS
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_not_elevated_is_fatal() {
        let err = require_elevated(false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LicenseReportError>(),
            Some(LicenseReportError::NotElevated)
        ));
        assert_eq!(crate::error::exit_code_for(&err), std::process::ExitCode::from(2));
        require_elevated(true).unwrap();
    }

    #[test]
    fn test_confirm_accepts_yes() {
        for answer in ["y\n", "Yes\r\n", "  YES  \n"] {
            let mut out = Vec::new();
            assert!(confirm("Install?", &mut Cursor::new(answer), &mut out).unwrap());
            assert_eq!(String::from_utf8(out).unwrap(), "Install? [y/N] ");
        }
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        for answer in ["\n", "n\n", "maybe\n", ""] {
            let mut out = Vec::new();
            assert!(!confirm("Install?", &mut Cursor::new(answer), &mut out).unwrap());
        }
    }
}
