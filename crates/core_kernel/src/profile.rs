//! Shared profile value objects
//!
//! These types are used by both the onboarding application aggregate and the
//! employee directory record, so they live in the kernel rather than in
//! either domain crate.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A US postal address
///
/// All components are required on a submitted application; the submission
/// gate reports missing components as dotted paths (e.g. `address.city`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Building or apartment number
    pub building: String,
    /// Street name
    pub street: String,
    /// City
    pub city: String,
    /// State (two-letter code or full name)
    pub state: String,
    /// ZIP code
    pub zip: String,
}

impl Address {
    /// Returns the dotted paths of empty components, prefixed with `address.`
    pub fn empty_component_paths(&self) -> Vec<String> {
        let components = [
            ("address.building", &self.building),
            ("address.street", &self.street),
            ("address.city", &self.city),
            ("address.state", &self.state),
            ("address.zip", &self.zip),
        ];
        components
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(path, _)| path.to_string())
            .collect()
    }

    /// Returns a single-line rendering for display
    pub fn single_line(&self) -> String {
        format!(
            "{} {}, {}, {} {}",
            self.building, self.street, self.city, self.state, self.zip
        )
    }
}

/// Gender selection offered on the onboarding form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    /// "I do not wish to answer"
    #[default]
    NoAnswer,
}

/// A named contact - used for the reference and emergency contact entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "relationship is required"))]
    pub relationship: String,
}

/// Validates a phone number: at least 10 digits, with only digits,
/// spaces, dashes, parentheses, and an optional leading `+` allowed.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+'));
    if digits >= 10 && allowed {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Validates a social security number: exactly 9 digits, optionally
/// grouped as `AAA-GG-SSSS`.
pub fn validate_ssn(ssn: &str) -> Result<(), ValidationError> {
    let digits: Vec<char> = ssn.chars().filter(|c| c.is_ascii_digit()).collect();
    let allowed = ssn.chars().all(|c| c.is_ascii_digit() || c == '-');
    if digits.len() == 9 && allowed {
        Ok(())
    } else {
        Err(ValidationError::new("ssn"))
    }
}
