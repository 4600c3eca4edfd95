//! Tests for shared profile value objects

use core_kernel::profile::{validate_phone, validate_ssn};
use core_kernel::{Address, ContactPerson, Gender};
use validator::Validate;

fn complete_address() -> Address {
    Address {
        building: "4".to_string(),
        street: "Elm Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62704".to_string(),
    }
}

#[test]
fn test_complete_address_has_no_gaps() {
    assert!(complete_address().empty_component_paths().is_empty());
}

#[test]
fn test_every_missing_component_is_reported() {
    let address = Address::default();
    let paths = address.empty_component_paths();
    assert_eq!(paths.len(), 5);
    assert!(paths.contains(&"address.city".to_string()));
    assert!(paths.contains(&"address.zip".to_string()));
}

#[test]
fn test_address_serde_round_trip() {
    let address = complete_address();
    let json = serde_json::to_string(&address).unwrap();
    assert!(json.contains("\"street\""));
    let back: Address = serde_json::from_str(&json).unwrap();
    assert_eq!(back, address);
}

#[test]
fn test_gender_default_is_no_answer() {
    assert_eq!(Gender::default(), Gender::NoAnswer);
}

#[test]
fn test_contact_person_requires_valid_phone() {
    let contact = ContactPerson {
        first_name: "Alex".to_string(),
        last_name: "Kim".to_string(),
        middle_name: None,
        phone: "123".to_string(),
        email: "alex@example.com".to_string(),
        relationship: "Friend".to_string(),
    };
    assert!(contact.validate().is_err());
}

#[test]
fn test_phone_and_ssn_validators_agree_on_digits_only() {
    assert!(validate_phone("5551234567").is_ok());
    assert!(validate_ssn("123456789").is_ok());
}
