//! Test Data Fixtures
//!
//! Pre-built values for common entities so tests only spell out what they
//! care about.

use chrono::NaiveDate;

use core_kernel::{Address, ContactPerson};

/// Address fixtures
pub struct AddressFixtures;

impl AddressFixtures {
    /// A complete, valid US address
    pub fn complete() -> Address {
        Address {
            building: "221B".to_string(),
            street: "Baker St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        }
    }
}

/// Contact fixtures
pub struct ContactFixtures;

impl ContactFixtures {
    /// A valid emergency contact
    pub fn emergency() -> ContactPerson {
        ContactPerson {
            first_name: "Rosa".to_string(),
            last_name: "Marquez".to_string(),
            middle_name: None,
            phone: "555-444-1122".to_string(),
            email: "rosa.marquez@example.com".to_string(),
            relationship: "Sister".to_string(),
        }
    }

    /// A valid referral contact
    pub fn reference() -> ContactPerson {
        ContactPerson {
            first_name: "Theo".to_string(),
            last_name: "Brandt".to_string(),
            middle_name: None,
            phone: "555-444-3344".to_string(),
            email: "theo.brandt@example.com".to_string(),
            relationship: "Former manager".to_string(),
        }
    }
}

/// Date fixtures
pub struct DateFixtures;

impl DateFixtures {
    /// A date of birth for an adult applicant
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1996, 4, 18).unwrap()
    }

    /// Work-authorization start date
    pub fn visa_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    /// Work-authorization end date
    pub fn visa_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 1, 15).unwrap()
    }
}
