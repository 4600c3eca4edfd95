//! Custom assertion helpers for domain types

use domain_onboarding::{Application, DocumentName, DocumentStatus, WorkAuthorization};

/// Asserts the chain matches the expected (name, status) sequence exactly
///
/// # Panics
///
/// Panics with a readable diff when the chain differs.
pub fn assert_chain(application: &Application, expected: &[(DocumentName, DocumentStatus)]) {
    let wa = application
        .work_authorization
        .as_ref()
        .expect("application has no work-authorization record");
    let actual: Vec<(DocumentName, DocumentStatus)> =
        wa.documents.iter().map(|d| (d.name, d.status)).collect();
    assert_eq!(
        actual, expected,
        "document chain mismatch: {actual:?} != {expected:?}"
    );
}

/// Asserts the chain invariant: at most one Pending record per name and no
/// duplicate stages
pub fn assert_chain_invariants(wa: &WorkAuthorization) {
    for name in DocumentName::CHAIN {
        let records = wa.documents.iter().filter(|d| d.name == name).count();
        assert!(records <= 1, "duplicate {name} records in chain");

        let pending = wa
            .documents
            .iter()
            .filter(|d| d.name == name && d.status == DocumentStatus::Pending)
            .count();
        assert!(pending <= 1, "more than one Pending {name} record");
    }
}
