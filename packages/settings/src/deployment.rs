// ABOUTME: Immutable deployment settings built from service settings and publish inputs
// ABOUTME: Ordered first-failure validation, a reusable validator and a builder

use crate::messages::MessageTable;
use crate::service::{DeploymentSlot, ServiceSettings};
use crate::validation::{
    require_existing_file, require_non_empty, HostFileSystem, PathProbe, SettingsArgument,
    ValidationError,
};
use serde::Serialize;
use tracing::debug;

/// Everything needed to describe a single deployment.
///
/// Only obtainable through validation, so every instance holds a package and
/// configuration path that existed when it was built and a non-empty label
/// and deployment name. Values are stored exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentSettings {
    service_settings: ServiceSettings,
    subscription_id: Option<String>,
    package_path: String,
    config_path: String,
    label: String,
    deployment_name: String,
}

impl DeploymentSettings {
    /// Validate with the host filesystem and the default messages
    pub fn new(
        service_settings: &ServiceSettings,
        package_path: &str,
        config_path: &str,
        label: &str,
        deployment_name: &str,
    ) -> Result<Self, ValidationError> {
        DeploymentSettingsValidator::new().construct(
            Some(service_settings),
            Some(package_path),
            Some(config_path),
            Some(label),
            Some(deployment_name),
        )
    }

    pub fn builder() -> DeploymentSettingsBuilder {
        DeploymentSettingsBuilder::default()
    }

    pub fn service_settings(&self) -> &ServiceSettings {
        &self.service_settings
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn deployment_name(&self) -> &str {
        &self.deployment_name
    }

    pub fn slot(&self) -> DeploymentSlot {
        self.service_settings.slot()
    }
}

/// Checks publish inputs and produces [`DeploymentSettings`]
#[derive(Debug, Clone, Default)]
pub struct DeploymentSettingsValidator<P = HostFileSystem> {
    probe: P,
    messages: MessageTable,
}

impl DeploymentSettingsValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PathProbe> DeploymentSettingsValidator<P> {
    pub fn with_probe<Q: PathProbe>(self, probe: Q) -> DeploymentSettingsValidator<Q> {
        DeploymentSettingsValidator {
            probe,
            messages: self.messages,
        }
    }

    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    /// Validate the inputs in order and stop at the first failure:
    /// service settings, package path, configuration path, label, deployment name.
    ///
    /// `None` stands for an absent argument. The filesystem is only probed for
    /// paths that passed their emptiness check.
    pub fn construct(
        &self,
        service_settings: Option<&ServiceSettings>,
        package_path: Option<&str>,
        config_path: Option<&str>,
        label: Option<&str>,
        deployment_name: Option<&str>,
    ) -> Result<DeploymentSettings, ValidationError> {
        let service_settings = service_settings.ok_or(ValidationError::MissingSettings)?;
        let package_path =
            require_existing_file(package_path, SettingsArgument::Package, &self.probe)?;
        let config_path = require_existing_file(
            config_path,
            SettingsArgument::ServiceConfiguration,
            &self.probe,
        )?;
        let label = require_non_empty(label, SettingsArgument::Label)?;
        let deployment_name = require_non_empty(deployment_name, SettingsArgument::DeploymentName)?;

        let settings = DeploymentSettings {
            subscription_id: service_settings.subscription.clone(),
            service_settings: service_settings.clone(),
            package_path: package_path.to_string(),
            config_path: config_path.to_string(),
            label: label.to_string(),
            deployment_name: deployment_name.to_string(),
        };

        debug!(
            deployment_name = %settings.deployment_name,
            slot = %settings.slot(),
            package = %settings.package_path,
            "Validated deployment settings"
        );
        Ok(settings)
    }

    /// Render an error with this validator's message table
    pub fn describe(&self, error: &ValidationError) -> String {
        self.messages.render(error)
    }
}

/// Collects publish inputs one at a time; unset inputs count as absent
#[derive(Debug, Clone, Default)]
pub struct DeploymentSettingsBuilder {
    service_settings: Option<ServiceSettings>,
    package_path: Option<String>,
    config_path: Option<String>,
    label: Option<String>,
    deployment_name: Option<String>,
}

impl DeploymentSettingsBuilder {
    pub fn service_settings(mut self, service_settings: ServiceSettings) -> Self {
        self.service_settings = Some(service_settings);
        self
    }

    pub fn package_path(mut self, path: impl Into<String>) -> Self {
        self.package_path = Some(path.into());
        self
    }

    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn deployment_name(mut self, name: impl Into<String>) -> Self {
        self.deployment_name = Some(name.into());
        self
    }

    pub fn build(&self) -> Result<DeploymentSettings, ValidationError> {
        self.build_with(&DeploymentSettingsValidator::new())
    }

    pub fn build_with<P: PathProbe>(
        &self,
        validator: &DeploymentSettingsValidator<P>,
    ) -> Result<DeploymentSettings, ValidationError> {
        validator.construct(
            self.service_settings.as_ref(),
            self.package_path.as_deref(),
            self.config_path.as_deref(),
            self.label.as_deref(),
            self.deployment_name.as_deref(),
        )
    }
}
