//! Approval projection onto the employee record
//!
//! A one-way copy of finalized application fields into the employee
//! directory, performed exactly once per approval. Absent source values are
//! written as concrete empty defaults so the employee record never carries
//! unset fields.

use core_kernel::Gender;
use domain_employee::{Employee, EmploymentSummary};

use crate::application::{Application, CitizenshipStatus};

/// Copies the finalized application profile onto the employee record
///
/// Called from the approve branch of the application decision; the caller
/// persists both records through a single atomic store operation.
pub fn project_onto_employee(employee: &mut Employee, application: &Application) {
    employee.first_name = application.first_name.clone();
    employee.last_name = application.last_name.clone();
    employee.middle_name = application.middle_name.clone();
    employee.preferred_name = application.preferred_name.clone();
    employee.cell_phone = application.cell_phone.clone();
    employee.work_phone = application.work_phone.clone();
    employee.ssn = application.ssn.clone();
    employee.date_of_birth = application.date_of_birth;
    employee.gender = application.gender.unwrap_or(Gender::NoAnswer);
    employee.citizenship = citizenship_wording(application);
    employee.address = application.address.clone();
    employee.employment = derive_employment(application);
    employee.emergency_contacts = application.emergency_contacts.clone();
    employee.document_paths = collect_document_paths(application);
    employee.touch();
}

fn citizenship_wording(application: &Application) -> String {
    match application.citizenship {
        Some(CitizenshipStatus::Citizen) => "Citizen".to_string(),
        Some(CitizenshipStatus::GreenCard) => "Green Card".to_string(),
        Some(CitizenshipStatus::WorkAuthorization) => application
            .work_authorization
            .as_ref()
            .map(|wa| wa.visa_type.to_string())
            .unwrap_or_else(|| "Work Authorization".to_string()),
        None => String::new(),
    }
}

fn derive_employment(application: &Application) -> EmploymentSummary {
    match (&application.citizenship, &application.work_authorization) {
        (Some(CitizenshipStatus::WorkAuthorization), Some(wa)) => EmploymentSummary {
            title: if wa.visa_title.trim().is_empty() {
                wa.visa_type.to_string()
            } else {
                wa.visa_title.clone()
            },
            start_date: wa.start_date,
            end_date: wa.end_date,
        },
        (Some(status), _) => EmploymentSummary {
            title: status.to_string(),
            start_date: None,
            end_date: None,
        },
        (None, _) => EmploymentSummary::default(),
    }
}

fn collect_document_paths(application: &Application) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(path) = &application.profile_picture {
        paths.push(path.clone());
    }
    if let Some(path) = &application.driver_license {
        paths.push(path.clone());
    }
    if let Some(wa) = &application.work_authorization {
        paths.extend(wa.documents.iter().filter_map(|d| d.url.clone()));
    }
    paths
}
