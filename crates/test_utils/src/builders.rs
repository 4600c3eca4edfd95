//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults. A
//! fresh `ApplicationBuilder` yields a profile that passes the submission
//! gate; tests override only the fields under test.

use chrono::NaiveDate;

use core_kernel::{Address, ContactPerson, EmployeeId, Gender};
use domain_employee::Employee;
use domain_onboarding::{
    Application, ApplicationStatus, CitizenshipStatus, VisaType, WorkAuthorization,
};

use crate::fixtures::{AddressFixtures, ContactFixtures, DateFixtures};

/// Builder for onboarding applications
pub struct ApplicationBuilder {
    employee_id: EmployeeId,
    email: String,
    first_name: String,
    last_name: String,
    cell_phone: String,
    work_phone: String,
    ssn: String,
    date_of_birth: Option<NaiveDate>,
    gender: Option<Gender>,
    citizenship: Option<CitizenshipStatus>,
    address: Address,
    work_authorization: Option<WorkAuthorization>,
    emergency_contacts: Vec<ContactPerson>,
    submitted: bool,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    /// Creates a builder with a complete citizen profile
    pub fn new() -> Self {
        Self {
            employee_id: EmployeeId::new_v7(),
            email: "test.employee@corp.example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "Employee".to_string(),
            cell_phone: "555-111-2222".to_string(),
            work_phone: "555-111-2223".to_string(),
            ssn: "111-22-3333".to_string(),
            date_of_birth: Some(DateFixtures::date_of_birth()),
            gender: Some(Gender::NoAnswer),
            citizenship: Some(CitizenshipStatus::Citizen),
            address: AddressFixtures::complete(),
            work_authorization: None,
            emergency_contacts: vec![ContactFixtures::emergency()],
            submitted: false,
        }
    }

    /// Sets the owning employee
    pub fn for_employee(mut self, employee: &Employee) -> Self {
        self.employee_id = employee.id;
        self.email = employee.email.clone();
        self
    }

    /// Sets the employee ID directly
    pub fn with_employee_id(mut self, id: EmployeeId) -> Self {
        self.employee_id = id;
        self
    }

    /// Declares the applicant as an F1(CPT/OPT) visa holder
    pub fn f1_visa(mut self) -> Self {
        self.citizenship = Some(CitizenshipStatus::WorkAuthorization);
        self.work_authorization = Some(WorkAuthorization::new(
            VisaType::F1CptOpt,
            "OPT",
            Some(DateFixtures::visa_start()),
            Some(DateFixtures::visa_end()),
        ));
        self
    }

    /// Declares the applicant as a non-chain visa holder
    pub fn visa(mut self, visa_type: VisaType, title: impl Into<String>) -> Self {
        self.citizenship = Some(CitizenshipStatus::WorkAuthorization);
        self.work_authorization = Some(WorkAuthorization::new(
            visa_type,
            title,
            Some(DateFixtures::visa_start()),
            Some(DateFixtures::visa_end()),
        ));
        self
    }

    /// Blanks a text field so the submission gate reports it
    pub fn missing_ssn(mut self) -> Self {
        self.ssn = String::new();
        self
    }

    /// Blanks an address component so the gate reports a dotted path
    pub fn missing_city(mut self) -> Self {
        self.address.city = String::new();
        self
    }

    /// Submits the built application (requires a complete profile)
    pub fn submitted(mut self) -> Self {
        self.submitted = true;
        self
    }

    /// Builds the application
    pub fn build(self) -> Application {
        let mut application = Application::for_registration(self.employee_id, self.email);
        application.first_name = self.first_name;
        application.last_name = self.last_name;
        application.cell_phone = self.cell_phone;
        application.work_phone = self.work_phone;
        application.ssn = self.ssn;
        application.date_of_birth = self.date_of_birth;
        application.gender = self.gender;
        application.citizenship = self.citizenship;
        application.address = self.address;
        application.work_authorization = self.work_authorization;
        application.emergency_contacts = self.emergency_contacts;
        if self.submitted {
            application
                .submit()
                .expect("builder profile should pass the submission gate");
        }
        application
    }
}

/// Builder for employee directory records
pub struct EmployeeBuilder {
    email: String,
    first_name: String,
    last_name: String,
}

impl Default for EmployeeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeBuilder {
    /// Creates a builder for a freshly provisioned account
    pub fn new() -> Self {
        Self {
            email: "test.employee@corp.example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    /// Sets the account email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Pre-fills the directory name
    pub fn named(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Builds the employee record
    pub fn build(self) -> Employee {
        let mut employee = Employee::provision(self.email);
        employee.first_name = self.first_name;
        employee.last_name = self.last_name;
        employee
    }
}
