//! Command-line surface of the cloudpub tool
//!
//! Parses publish inputs, merges service settings from file, environment and
//! flags, and reports the resulting deployment settings.

use crate::config::Config;
use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cloudpub_settings::{
    DeploymentSettings, DeploymentSettingsValidator, DeploymentSlot, ServiceSettings,
    ServiceSettingsOverrides,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cloudpub")]
#[command(about = "Cloudpub CLI - describe cloud service deployments")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate publish inputs and show the resulting deployment settings
    DeploymentSettings(DeploymentSettingsArgs),
    /// Show the effective service settings
    ServiceSettings(ServiceSettingsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where service settings come from, and per-field overrides
#[derive(Args, Debug, Default)]
pub struct SettingsSourceArgs {
    /// Path to the service settings JSON file
    #[arg(long)]
    pub service_settings: Option<PathBuf>,
    /// Deployment slot (production or staging)
    #[arg(long)]
    pub slot: Option<DeploymentSlot>,
    /// Service location
    #[arg(long)]
    pub location: Option<String>,
    /// Subscription name or identifier
    #[arg(long)]
    pub subscription: Option<String>,
    /// Storage account used for package upload
    #[arg(long)]
    pub storage_account: Option<String>,
    /// Affinity group of the service
    #[arg(long)]
    pub affinity_group: Option<String>,
}

impl SettingsSourceArgs {
    fn overrides(&self) -> ServiceSettingsOverrides {
        ServiceSettingsOverrides {
            slot: self.slot,
            location: self.location.clone(),
            subscription: self.subscription.clone(),
            storage_account_name: self.storage_account.clone(),
            affinity_group: self.affinity_group.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct DeploymentSettingsArgs {
    #[command(flatten)]
    pub source: SettingsSourceArgs,
    /// Path to the service package
    #[arg(long)]
    pub package: Option<String>,
    /// Path to the service configuration file
    #[arg(long)]
    pub config: Option<String>,
    /// Deployment label
    #[arg(long)]
    pub label: Option<String>,
    /// Deployment name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ServiceSettingsArgs {
    #[command(flatten)]
    pub source: SettingsSourceArgs,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Run a parsed command, writing its report to `out`
pub fn run(cli: Cli, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::DeploymentSettings(args) => deployment_settings(args, config, out),
        Commands::ServiceSettings(args) => service_settings(args, config, out),
    }
}

/// File (or defaults) first, then environment defaults for unset fields, then flags
pub fn effective_service_settings(
    source: &SettingsSourceArgs,
    config: &Config,
) -> anyhow::Result<ServiceSettings> {
    let path = source
        .service_settings
        .clone()
        .unwrap_or_else(|| config.service_settings_path.clone());

    let settings = ServiceSettings::load_or_default(&path)
        .with_context(|| format!("Could not load service settings from {}", path.display()))?;

    Ok(settings
        .fill_unset(config.service_defaults())
        .apply(source.overrides()))
}

fn deployment_settings(
    args: DeploymentSettingsArgs,
    config: &Config,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let service_settings = effective_service_settings(&args.source, config)?;
    let validator = DeploymentSettingsValidator::new();

    let deployment = validator
        .construct(
            Some(&service_settings),
            args.package.as_deref(),
            args.config.as_deref(),
            args.label.as_deref(),
            args.name.as_deref(),
        )
        .map_err(|err| anyhow!(validator.describe(&err)))?;

    debug!(deployment_name = deployment.deployment_name(), "Reporting deployment settings");

    match args.format {
        OutputFormat::Text => write_deployment_text(&deployment, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &deployment)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn service_settings(
    args: ServiceSettingsArgs,
    config: &Config,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let settings = effective_service_settings(&args.source, config)?;

    match args.format {
        OutputFormat::Text => write_service_text(&settings, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &settings)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_deployment_text(
    deployment: &DeploymentSettings,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(out, "deployment_name: {}", deployment.deployment_name())?;
    writeln!(out, "label: {}", deployment.label())?;
    writeln!(out, "package: {}", deployment.package_path())?;
    writeln!(out, "configuration: {}", deployment.config_path())?;
    writeln!(
        out,
        "subscription_id: {}",
        deployment.subscription_id().unwrap_or("-")
    )?;
    write_service_text(deployment.service_settings(), out)
}

fn write_service_text(settings: &ServiceSettings, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "slot: {}", settings.slot())?;
    writeln!(out, "location: {}", settings.location.as_deref().unwrap_or("-"))?;
    writeln!(out, "subscription: {}", settings.subscription().unwrap_or("-"))?;
    writeln!(
        out,
        "storage_account: {}",
        settings.storage_account_name.as_deref().unwrap_or("-")
    )?;
    writeln!(
        out,
        "affinity_group: {}",
        settings.affinity_group.as_deref().unwrap_or("-")
    )
}
