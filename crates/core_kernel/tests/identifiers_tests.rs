//! Tests for strongly-typed identifiers

use core_kernel::{ApplicationId, EmployeeId};
use std::collections::HashSet;

#[test]
fn test_ids_are_unique() {
    let ids: HashSet<ApplicationId> = (0..100).map(|_| ApplicationId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_v7_ids_are_time_ordered_format() {
    let id = EmployeeId::new_v7();
    assert_eq!(id.as_uuid().get_version_num(), 7);
}

#[test]
fn test_display_prefixes_differ() {
    assert_ne!(ApplicationId::prefix(), EmployeeId::prefix());
    assert!(ApplicationId::new().to_string().starts_with("APP-"));
    assert!(EmployeeId::new().to_string().starts_with("EMP-"));
}

#[test]
fn test_parse_without_prefix() {
    let id = ApplicationId::new();
    let bare = id.as_uuid().to_string();
    let parsed: ApplicationId = bare.parse().unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_serde_transparent() {
    let id = ApplicationId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serialized as a bare UUID string, no struct wrapper
    assert!(json.starts_with('"'));
    let back: ApplicationId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
