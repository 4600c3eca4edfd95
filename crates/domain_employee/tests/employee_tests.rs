//! Tests for the employee directory record

use core_kernel::{Address, ContactPerson, Gender};
use domain_employee::{Employee, EmploymentSummary};

#[test]
fn test_employee_serde_round_trip() {
    let mut employee = Employee::provision("dev@example.com");
    employee.first_name = "Priya".to_string();
    employee.last_name = "Shah".to_string();
    employee.gender = Gender::Female;
    employee.address = Address {
        building: "7".to_string(),
        street: "Oak Ave".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip: "78701".to_string(),
    };
    employee.employment = EmploymentSummary {
        title: "F1(CPT/OPT)".to_string(),
        start_date: None,
        end_date: None,
    };
    employee.emergency_contacts = vec![ContactPerson {
        first_name: "Ravi".to_string(),
        last_name: "Shah".to_string(),
        middle_name: None,
        phone: "512-555-0100".to_string(),
        email: "ravi@example.com".to_string(),
        relationship: "Spouse".to_string(),
    }];

    let json = serde_json::to_string(&employee).unwrap();
    assert!(json.contains("\"firstName\":\"Priya\""));
    assert!(json.contains("\"employment\""));

    let back: Employee = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, employee.id);
    assert_eq!(back.employment.title, "F1(CPT/OPT)");
    assert_eq!(back.emergency_contacts.len(), 1);
}

#[test]
fn test_deactivate_touches_timestamp() {
    let mut employee = Employee::provision("x@example.com");
    let created = employee.updated_at;
    employee.deactivate();
    assert!(!employee.is_active);
    assert!(employee.updated_at >= created);
}
