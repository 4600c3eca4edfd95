//! Employee record
//!
//! The employee directory entry. Fields mirror the finalized onboarding
//! profile; every field is written with a concrete value (empty string or
//! `None`), never left unset, so downstream consumers can rely on the shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Address, ContactPerson, EmployeeId, Gender};

/// Employment summary derived from the work-authorization record
///
/// For citizens and green-card holders `title` carries the citizenship
/// wording and the dates are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentSummary {
    /// Visa title or citizenship wording
    pub title: String,
    /// Work-authorization start date
    pub start_date: Option<NaiveDate>,
    /// Work-authorization end date
    pub end_date: Option<NaiveDate>,
}

/// An employee directory record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier
    pub id: EmployeeId,
    /// Legal first name
    pub first_name: String,
    /// Legal last name
    pub last_name: String,
    /// Middle name, empty when not provided
    pub middle_name: String,
    /// Preferred name, empty when not provided
    pub preferred_name: String,
    /// Work email - the account identity, set at provisioning time
    pub email: String,
    /// Cell phone
    pub cell_phone: String,
    /// Work phone
    pub work_phone: String,
    /// Social security number
    pub ssn: String,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Gender
    pub gender: Gender,
    /// Citizenship wording ("Citizen", "Green Card", or the visa type)
    pub citizenship: String,
    /// Home address
    pub address: Address,
    /// Employment summary derived from work authorization
    pub employment: EmploymentSummary,
    /// Emergency contacts
    pub emergency_contacts: Vec<ContactPerson>,
    /// Stored document paths copied from the approved application
    pub document_paths: Vec<String>,
    /// Whether this employee is active
    pub is_active: bool,
    /// When this record was created
    pub created_at: DateTime<Utc>,
    /// When this record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a blank employee record at account-provisioning time
    ///
    /// Only the email is known at this point; everything else is filled in
    /// by the onboarding approval projection.
    pub fn provision(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EmployeeId::new_v7(),
            first_name: String::new(),
            last_name: String::new(),
            middle_name: String::new(),
            preferred_name: String::new(),
            email: email.into(),
            cell_phone: String::new(),
            work_phone: String::new(),
            ssn: String::new(),
            date_of_birth: None,
            gender: Gender::NoAnswer,
            citizenship: String::new(),
            address: Address::default(),
            employment: EmploymentSummary::default(),
            emergency_contacts: Vec::new(),
            document_paths: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the display name, preferring the preferred name when present
    pub fn display_name(&self) -> String {
        let first = if self.preferred_name.is_empty() {
            &self.first_name
        } else {
            &self.preferred_name
        };
        if first.is_empty() && self.last_name.is_empty() {
            return self.email.clone();
        }
        format!("{} {}", first, self.last_name).trim().to_string()
    }

    /// Marks the record as updated now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Deactivates the employee (soft delete)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }
}
