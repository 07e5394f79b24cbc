use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ApiError;

/// Per-field validation messages, keyed by input field name.
#[derive(Debug, Default, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the trimmed value of a required text field, or a 422 error
/// when the field is missing or blank.
pub fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => {
            let mut errors = ValidationErrors::default();
            errors.add(field, format!("The {field} field is required."));
            Err(ApiError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_present_text() {
        assert_eq!(required_text("title", Some("  Buy milk ")).unwrap(), "Buy milk");
    }

    #[test]
    fn rejects_missing_and_blank_text() {
        assert!(required_text("title", None).is_err());
        assert!(required_text("title", Some("")).is_err());
        assert!(required_text("title", Some("   ")).is_err());
    }
}
