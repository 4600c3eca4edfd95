//! Application aggregate
//!
//! One onboarding application per employee. Created at registration, edited
//! by the employee while NeverSubmitted or Rejected, submitted through the
//! completeness gate, and decided by HR. An optimistic-concurrency version
//! protects the read-modify-write cycle against racing reviewers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use core_kernel::{validate_phone, validate_ssn, Address, ApplicationId, ContactPerson, EmployeeId, Gender};

use crate::decision::ReviewDecision;
use crate::error::OnboardingError;
use crate::ports::CitizenshipDeclaration;
use crate::work_authorization::WorkAuthorization;

/// Application review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Created at registration, not yet submitted
    NeverSubmitted,
    /// Submitted and awaiting HR review
    Pending,
    /// Approved by HR
    Approved,
    /// Rejected by HR - editable and resubmittable
    Rejected,
}

impl ApplicationStatus {
    /// Returns true when the employee may edit and resubmit
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::NeverSubmitted | ApplicationStatus::Rejected
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::NeverSubmitted => "NeverSubmitted",
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// Citizenship standing declared on the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitizenshipStatus {
    Citizen,
    #[serde(rename = "Green Card")]
    GreenCard,
    #[serde(rename = "Work Authorization")]
    WorkAuthorization,
}

impl fmt::Display for CitizenshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CitizenshipStatus::Citizen => "Citizen",
            CitizenshipStatus::GreenCard => "Green Card",
            CitizenshipStatus::WorkAuthorization => "Work Authorization",
        };
        f.write_str(s)
    }
}

/// The onboarding application aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique identifier
    pub id: ApplicationId,
    /// The employee this application belongs to (one application each)
    pub employee_id: EmployeeId,
    /// Review status
    pub status: ApplicationStatus,
    /// HR feedback; set on rejection, cleared on approval
    pub feedback: Option<String>,
    /// Legal first name
    pub first_name: String,
    /// Legal last name
    pub last_name: String,
    /// Middle name (optional on the form)
    pub middle_name: String,
    /// Preferred name (optional on the form)
    pub preferred_name: String,
    /// Account email, fixed at registration
    pub email: String,
    /// Cell phone
    pub cell_phone: String,
    /// Work phone
    pub work_phone: String,
    /// Social security number
    pub ssn: String,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Gender; `None` until the employee answers
    pub gender: Option<Gender>,
    /// Citizenship standing; `None` until declared
    pub citizenship: Option<CitizenshipStatus>,
    /// Home address
    pub address: Address,
    /// Visa record; present only for work-authorization holders
    pub work_authorization: Option<WorkAuthorization>,
    /// Stored profile-picture path (flat slot, not chain-tracked)
    pub profile_picture: Option<String>,
    /// Stored driver-license path (flat slot, not chain-tracked)
    pub driver_license: Option<String>,
    /// Referral contact (optional on the form)
    pub reference: Option<ContactPerson>,
    /// Emergency contacts (optional on the form)
    pub emergency_contacts: Vec<ContactPerson>,
    /// Optimistic-concurrency version, bumped by the store on every save
    pub version: u64,
    /// When this application was created
    pub created_at: DateTime<Utc>,
    /// When this application was last updated
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates the blank aggregate inserted at registration time
    pub fn for_registration(employee_id: EmployeeId, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::new_v7(),
            employee_id,
            status: ApplicationStatus::NeverSubmitted,
            feedback: None,
            first_name: String::new(),
            last_name: String::new(),
            middle_name: String::new(),
            preferred_name: String::new(),
            email: email.into(),
            cell_phone: String::new(),
            work_phone: String::new(),
            ssn: String::new(),
            date_of_birth: None,
            gender: None,
            citizenship: None,
            address: Address::default(),
            work_authorization: None,
            profile_picture: None,
            driver_license: None,
            reference: None,
            emergency_contacts: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the dotted paths of required fields that are still empty
    ///
    /// Excluded from the scan: middle name, preferred name, the flat document
    /// slots, the work-authorization record, the reference, emergency
    /// contacts, and feedback. Address components are reported one level
    /// deep (`address.city`).
    pub fn missing_required_fields(&self) -> Vec<String> {
        let text_fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("cellPhone", &self.cell_phone),
            ("workPhone", &self.work_phone),
            ("ssn", &self.ssn),
        ];

        let mut missing: Vec<String> = text_fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(path, _)| path.to_string())
            .collect();

        if self.date_of_birth.is_none() {
            missing.push("dateOfBirth".to_string());
        }
        if self.gender.is_none() {
            missing.push("gender".to_string());
        }
        if self.citizenship.is_none() {
            missing.push("citizenship".to_string());
        }
        missing.extend(self.address.empty_component_paths());
        missing
    }

    /// Submits the application for HR review
    ///
    /// Valid only from NeverSubmitted or Rejected with no missing required
    /// fields. On failure nothing is mutated and the missing paths are
    /// reported.
    pub fn submit(&mut self) -> Result<(), OnboardingError> {
        match self.status {
            ApplicationStatus::NeverSubmitted | ApplicationStatus::Rejected => {
                let missing = self.missing_required_fields();
                if !missing.is_empty() {
                    return Err(OnboardingError::IncompleteApplication { missing });
                }
                self.status = ApplicationStatus::Pending;
                self.touch();
                Ok(())
            }
            ApplicationStatus::Pending | ApplicationStatus::Approved => {
                Err(OnboardingError::InvalidStatusTransition {
                    from: self.status.to_string(),
                    to: ApplicationStatus::Pending.to_string(),
                })
            }
        }
    }

    /// Applies an HR decision
    ///
    /// Valid only while Pending. Approval clears feedback and resets the
    /// document chain for work-authorization holders; rejection stores the
    /// feedback and hands the application back to the employee.
    pub fn decide(&mut self, decision: &ReviewDecision) -> Result<(), OnboardingError> {
        if self.status != ApplicationStatus::Pending {
            let to = match decision {
                ReviewDecision::Approve => ApplicationStatus::Approved,
                ReviewDecision::Reject { .. } => ApplicationStatus::Rejected,
            };
            return Err(OnboardingError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }

        match decision {
            ReviewDecision::Approve => {
                self.status = ApplicationStatus::Approved;
                self.feedback = None;
                if let Some(wa) = &mut self.work_authorization {
                    wa.reset_chain();
                }
            }
            ReviewDecision::Reject { feedback } => {
                self.status = ApplicationStatus::Rejected;
                self.feedback = Some(feedback.clone());
            }
        }
        self.touch();
        Ok(())
    }

    /// Applies an employee profile patch
    ///
    /// Valid only while NeverSubmitted or Rejected. The patch type is the
    /// whitelist: email, status, feedback, and chain documents are not
    /// representable in it.
    pub fn apply_patch(&mut self, patch: ProfilePatch) -> Result<(), OnboardingError> {
        if !self.status.is_editable() {
            return Err(OnboardingError::ApplicationNotEditable(
                self.status.to_string(),
            ));
        }
        patch.validate_fields()?;

        let ProfilePatch {
            first_name,
            last_name,
            middle_name,
            preferred_name,
            cell_phone,
            work_phone,
            ssn,
            date_of_birth,
            gender,
            address,
            citizenship,
            profile_picture,
            driver_license,
            reference,
            emergency_contacts,
        } = patch;

        if let Some(value) = first_name {
            self.first_name = value;
        }
        if let Some(value) = last_name {
            self.last_name = value;
        }
        if let Some(value) = middle_name {
            self.middle_name = value;
        }
        if let Some(value) = preferred_name {
            self.preferred_name = value;
        }
        if let Some(value) = cell_phone {
            self.cell_phone = value;
        }
        if let Some(value) = work_phone {
            self.work_phone = value;
        }
        if let Some(value) = ssn {
            self.ssn = value;
        }
        if let Some(value) = date_of_birth {
            self.date_of_birth = Some(value);
        }
        if let Some(value) = gender {
            self.gender = Some(value);
        }
        if let Some(value) = address {
            self.address = value;
        }
        if let Some(declaration) = citizenship {
            self.apply_citizenship(declaration);
        }
        if let Some(value) = profile_picture {
            self.profile_picture = Some(value);
        }
        if let Some(value) = driver_license {
            self.driver_license = Some(value);
        }
        if let Some(value) = reference {
            self.reference = Some(value);
        }
        if let Some(value) = emergency_contacts {
            self.emergency_contacts = value;
        }

        self.touch();
        Ok(())
    }

    /// Applies a citizenship declaration, keeping any existing chain intact
    ///
    /// The chain itself is never client-writable; switching to a visa class
    /// only replaces the metadata, and switching away drops the record.
    fn apply_citizenship(&mut self, declaration: CitizenshipDeclaration) {
        match declaration {
            CitizenshipDeclaration::Citizen => {
                self.citizenship = Some(CitizenshipStatus::Citizen);
                self.work_authorization = None;
            }
            CitizenshipDeclaration::GreenCard => {
                self.citizenship = Some(CitizenshipStatus::GreenCard);
                self.work_authorization = None;
            }
            CitizenshipDeclaration::WorkAuthorization(visa) => {
                self.citizenship = Some(CitizenshipStatus::WorkAuthorization);
                let documents = self
                    .work_authorization
                    .take()
                    .map(|wa| wa.documents)
                    .unwrap_or_default();
                let mut wa = visa.into_work_authorization();
                wa.documents = documents;
                self.work_authorization = Some(wa);
            }
        }
    }

    /// Marks the aggregate as updated now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Employee-editable profile fields
///
/// Every field is optional; `None` means "leave unchanged". Fields absent
/// from this struct (email, status, feedback, chain documents) cannot be
/// patched at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub preferred_name: Option<String>,
    pub cell_phone: Option<String>,
    pub work_phone: Option<String>,
    pub ssn: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<Address>,
    pub citizenship: Option<CitizenshipDeclaration>,
    pub profile_picture: Option<String>,
    pub driver_license: Option<String>,
    pub reference: Option<ContactPerson>,
    pub emergency_contacts: Option<Vec<ContactPerson>>,
}

impl ProfilePatch {
    /// Validates the formatted fields present in the patch
    ///
    /// Mirrors the field-level validators the storage schema enforces:
    /// phone shape, SSN shape, and contact-person completeness.
    fn validate_fields(&self) -> Result<(), OnboardingError> {
        if let Some(phone) = &self.cell_phone {
            validate_phone(phone)
                .map_err(|_| OnboardingError::Validation("invalid cell phone".to_string()))?;
        }
        if let Some(phone) = &self.work_phone {
            validate_phone(phone)
                .map_err(|_| OnboardingError::Validation("invalid work phone".to_string()))?;
        }
        if let Some(ssn) = &self.ssn {
            validate_ssn(ssn)
                .map_err(|_| OnboardingError::Validation("invalid SSN".to_string()))?;
        }
        if let Some(contact) = &self.reference {
            contact
                .validate()
                .map_err(|e| OnboardingError::Validation(format!("invalid reference: {e}")))?;
        }
        if let Some(contacts) = &self.emergency_contacts {
            for contact in contacts {
                contact.validate().map_err(|e| {
                    OnboardingError::Validation(format!("invalid emergency contact: {e}"))
                })?;
            }
        }
        Ok(())
    }
}
