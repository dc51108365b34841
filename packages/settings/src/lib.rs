// ABOUTME: Service and deployment settings for the cloud service publishing tool
// ABOUTME: Validated-at-construction deployment descriptions and their error messages

pub mod deployment;
pub mod messages;
pub mod service;
pub mod validation;

pub use deployment::{DeploymentSettings, DeploymentSettingsBuilder, DeploymentSettingsValidator};
pub use messages::{MessageKind, MessageTable};
pub use service::{
    DeploymentSlot, ServiceSettings, ServiceSettingsError, ServiceSettingsOverrides,
};
pub use validation::{HostFileSystem, PathProbe, SettingsArgument, ValidationError};
