//! Field validation
//!
//! Runs when a step configuration is saved. Only the entry point is checked;
//! option strings are accepted as-is, including empty ones.

use super::errors::ValidationError;
use super::types::{BeamStep, Validate};
use std::fmt;

/// Outcome of checking a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    /// Field is acceptable
    Ok,
    /// Field is rejected with a message for the user
    Error(String),
}

impl FormValidation {
    /// Returns true if the field passed
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Message for a rejected field
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Error(msg) => Some(msg),
        }
    }
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Error(msg) => write!(f, "ERROR: {msg}"),
        }
    }
}

impl From<Result<(), ValidationError>> for FormValidation {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Checks the "path to main class" field
#[must_use]
pub fn check_path_to_main_class(value: &str) -> FormValidation {
    validate_main_class(value).into()
}

fn validate_main_class(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingMainClass);
    }
    Ok(())
}

impl Validate for BeamStep {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        validate_main_class(self.path_to_main_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Toolchain;

    #[test]
    fn test_empty_main_class_is_rejected() {
        let result = check_path_to_main_class("");
        assert!(!result.is_ok());
        assert_eq!(result.message(), Some("Missing path to main class."));
    }

    #[test]
    fn test_non_empty_main_class_passes() {
        for value in ["com.acme.Main", "pkg.module", " ", "not a class!"] {
            assert_eq!(check_path_to_main_class(value), FormValidation::Ok);
        }
    }

    #[test]
    fn test_step_validate() {
        let step = BeamStep::new("", "--runner=Dataflow", "", Toolchain::MavenJava);
        assert_eq!(step.validate(), Err(ValidationError::MissingMainClass));

        let step = BeamStep::new("com.acme.Main", "", "", Toolchain::MavenJava);
        assert!(step.validate().is_ok());
    }

    #[test]
    fn test_form_validation_display() {
        assert_eq!(FormValidation::Ok.to_string(), "OK");
        assert_eq!(
            FormValidation::Error("bad".to_string()).to_string(),
            "ERROR: bad"
        );
    }
}
