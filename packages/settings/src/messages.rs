// ABOUTME: Message templates for deployment settings validation errors
// ABOUTME: Maps each error kind to a template with positional placeholders

use crate::validation::ValidationError;

/// Symbolic key of a validation message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    InvalidServiceSetting,
    InvalidOrEmptyArgument,
    PathDoesNotExistForElement,
}

/// Templates used to turn a [`ValidationError`] into user-facing text.
///
/// `{0}` and `{1}` are replaced with the error's arguments: the argument's
/// display name for empty arguments, the element name and path for missing
/// files. Unknown placeholders are left as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    invalid_service_setting: String,
    invalid_or_empty_argument: String,
    path_does_not_exist_for_element: String,
}

impl Default for MessageTable {
    fn default() -> Self {
        MessageTable {
            invalid_service_setting: "Invalid service setting".to_string(),
            invalid_or_empty_argument: "Invalid or empty argument: {0}".to_string(),
            path_does_not_exist_for_element: "Path does not exist for element {0}: {1}"
                .to_string(),
        }
    }
}

impl MessageTable {
    pub fn with_template(mut self, kind: MessageKind, template: impl Into<String>) -> Self {
        let template = template.into();
        match kind {
            MessageKind::InvalidServiceSetting => self.invalid_service_setting = template,
            MessageKind::InvalidOrEmptyArgument => self.invalid_or_empty_argument = template,
            MessageKind::PathDoesNotExistForElement => {
                self.path_does_not_exist_for_element = template
            }
        }
        self
    }

    pub fn template(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::InvalidServiceSetting => &self.invalid_service_setting,
            MessageKind::InvalidOrEmptyArgument => &self.invalid_or_empty_argument,
            MessageKind::PathDoesNotExistForElement => &self.path_does_not_exist_for_element,
        }
    }

    pub fn render(&self, error: &ValidationError) -> String {
        let template = self.template(error.kind());
        match error {
            ValidationError::MissingSettings => fill(template, &[]),
            ValidationError::InvalidArgument(argument) => {
                fill(template, &[argument.display_name()])
            }
            ValidationError::PathNotFound(argument, path) => {
                fill(template, &[argument.element_name(), path])
            }
        }
    }
}

/// Single-pass placeholder substitution, so argument text is never rescanned
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let placeholder = after
            .find('}')
            .and_then(|end| after[..end].parse::<usize>().ok().map(|index| (index, end)));

        match placeholder {
            Some((index, end)) if index < args.len() => {
                out.push_str(args[index]);
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SettingsArgument;
    use rstest::rstest;

    #[rstest]
    #[case(ValidationError::MissingSettings)]
    #[case(ValidationError::InvalidArgument(SettingsArgument::Package))]
    #[case(ValidationError::InvalidArgument(SettingsArgument::DeploymentName))]
    #[case(ValidationError::PathNotFound(SettingsArgument::Package, "/tmp/a.cspkg".to_string()))]
    fn test_default_table_matches_display(#[case] error: ValidationError) {
        assert_eq!(MessageTable::default().render(&error), error.to_string());
    }

    #[test]
    fn test_custom_template() {
        let table = MessageTable::default()
            .with_template(MessageKind::InvalidOrEmptyArgument, "{0} could not be null or empty");

        let message = table.render(&ValidationError::InvalidArgument(SettingsArgument::Label));

        assert_eq!(message, "Label could not be null or empty");
        assert_eq!(
            table.template(MessageKind::InvalidServiceSetting),
            "Invalid service setting"
        );
    }

    #[test]
    fn test_placeholders_can_be_reordered() {
        let table = MessageTable::default().with_template(
            MessageKind::PathDoesNotExistForElement,
            "'{1}' ({0}) was not found",
        );

        let message = table.render(&ValidationError::PathNotFound(
            SettingsArgument::ServiceConfiguration,
            "cloud.cscfg".to_string(),
        ));

        assert_eq!(message, "'cloud.cscfg' (Service Configuration) was not found");
    }

    #[test]
    fn test_path_containing_placeholder_is_not_rescanned() {
        let message = MessageTable::default().render(&ValidationError::PathNotFound(
            SettingsArgument::Package,
            "/tmp/{1}.cspkg".to_string(),
        ));

        assert_eq!(message, "Path does not exist for element Package: /tmp/{1}.cspkg");
    }

    #[rstest]
    #[case("no placeholders", &[], "no placeholders")]
    #[case("{0} and {2}", &["a"], "a and {2}")]
    #[case("{x} {0}", &["a"], "{x} a")]
    #[case("open {", &[], "open {")]
    fn test_fill(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(fill(template, args), expected);
    }
}
