// ABOUTME: Validation error taxonomy and argument checks for deployment settings
// ABOUTME: Non-empty and file-existence checks behind an injectable path probe

use crate::messages::MessageKind;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Inputs of a deployment settings construction that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsArgument {
    Package,
    ServiceConfiguration,
    Label,
    DeploymentName,
}

impl SettingsArgument {
    /// Name used in "invalid or empty argument" messages
    pub fn display_name(&self) -> &'static str {
        match self {
            SettingsArgument::Package => "package",
            SettingsArgument::ServiceConfiguration => "Service Configuration",
            SettingsArgument::Label => "Label",
            SettingsArgument::DeploymentName => "Deployment name",
        }
    }

    /// Name used in "path does not exist" messages
    pub fn element_name(&self) -> &'static str {
        match self {
            SettingsArgument::Package => "Package",
            other => other.display_name(),
        }
    }
}

/// Reasons a deployment settings construction is rejected.
///
/// `Display` renders the default English messages; use
/// [`crate::MessageTable::render`] for a different table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid service setting")]
    MissingSettings,

    #[error("Invalid or empty argument: {}", .0.display_name())]
    InvalidArgument(SettingsArgument),

    #[error("Path does not exist for element {}: {}", .0.element_name(), .1)]
    PathNotFound(SettingsArgument, String),
}

impl ValidationError {
    /// Message template this error is rendered with
    pub fn kind(&self) -> MessageKind {
        match self {
            ValidationError::MissingSettings => MessageKind::InvalidServiceSetting,
            ValidationError::InvalidArgument(_) => MessageKind::InvalidOrEmptyArgument,
            ValidationError::PathNotFound(..) => MessageKind::PathDoesNotExistForElement,
        }
    }

    pub fn argument(&self) -> Option<SettingsArgument> {
        match self {
            ValidationError::MissingSettings => None,
            ValidationError::InvalidArgument(argument)
            | ValidationError::PathNotFound(argument, _) => Some(*argument),
        }
    }
}

/// Read-only filesystem query used for path arguments
#[cfg_attr(test, mockall::automock)]
pub trait PathProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFileSystem;

impl PathProbe for HostFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        // Directories, dangling symlinks and unreadable paths all count as missing
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

/// Reject an absent or empty string argument
pub fn require_non_empty(
    value: Option<&str>,
    argument: SettingsArgument,
) -> Result<&str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::InvalidArgument(argument)),
    }
}

/// Reject an absent or empty path, then a path that is not an existing file
pub fn require_existing_file<'a, P>(
    value: Option<&'a str>,
    argument: SettingsArgument,
    probe: &P,
) -> Result<&'a str, ValidationError>
where
    P: PathProbe + ?Sized,
{
    let path = require_non_empty(value, argument)?;
    if !probe.is_file(Path::new(path)) {
        return Err(ValidationError::PathNotFound(argument, path.to_string()));
    }
    Ok(path)
}
