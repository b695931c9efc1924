//! Auth module for Azure CLI authentication
//!
//! Provides token acquisition using Azure CLI credentials for Microsoft Graph access.

mod azure_cli;

pub use azure_cli::AzureAuthenticator;
