//! Property tests for the document chain invariants
//!
//! Whatever sequence of uploads and decisions HR and the employee throw at
//! a chain, two invariants must hold at every step:
//! - at most one Pending record per document name
//! - a record for stage N+1 exists only when stage N is Approved

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use domain_onboarding::{
    DocumentName, DocumentStatus, ReviewDecision, VisaType, WorkAuthorization,
};

#[derive(Debug, Clone)]
enum ChainOp {
    Upload(DocumentName),
    Approve(DocumentName),
    Reject(DocumentName),
    ResetChain,
}

fn document_name() -> impl Strategy<Value = DocumentName> {
    prop_oneof![
        Just(DocumentName::OptReceipt),
        Just(DocumentName::I983),
        Just(DocumentName::I20),
    ]
}

fn chain_op() -> impl Strategy<Value = ChainOp> {
    prop_oneof![
        document_name().prop_map(ChainOp::Upload),
        document_name().prop_map(ChainOp::Approve),
        document_name().prop_map(ChainOp::Reject),
        Just(ChainOp::ResetChain),
    ]
}

fn apply(wa: &mut WorkAuthorization, op: &ChainOp) {
    // invalid operations are rejected by the domain; the property is that
    // no sequence, valid or not, can corrupt the chain
    match op {
        ChainOp::Upload(name) => {
            let _ = wa.record_upload(*name, format!("/files/{name}.pdf"));
        }
        ChainOp::Approve(name) => {
            let _ = wa.decide_document(*name, &ReviewDecision::Approve);
        }
        ChainOp::Reject(name) => {
            let reject = ReviewDecision::reject("needs another look").unwrap();
            let _ = wa.decide_document(*name, &reject);
        }
        ChainOp::ResetChain => wa.reset_chain(),
    }
}

fn assert_invariants(wa: &WorkAuthorization) -> Result<(), TestCaseError> {
    for name in DocumentName::CHAIN {
        let pending = wa
            .documents
            .iter()
            .filter(|d| d.name == name && d.status == DocumentStatus::Pending)
            .count();
        prop_assert!(pending <= 1, "more than one Pending {name} record");

        let records = wa.documents.iter().filter(|d| d.name == name).count();
        prop_assert!(records <= 1, "duplicate {name} records");

        if let Some(next) = name.next_stage() {
            if wa.document(next).is_some() {
                let stage_status = wa.document(name).map(|d| d.status);
                prop_assert_eq!(
                    stage_status,
                    Some(DocumentStatus::Approved),
                    "{} exists but {} is not approved",
                    next,
                    name
                );
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn chain_invariants_hold_under_any_operation_sequence(
        ops in prop::collection::vec(chain_op(), 0..40)
    ) {
        let mut wa = WorkAuthorization::new(VisaType::F1CptOpt, "OPT", None, None);
        wa.reset_chain();

        for op in &ops {
            apply(&mut wa, op);
            assert_invariants(&wa)?;
        }
    }

    #[test]
    fn chain_order_is_never_violated(
        ops in prop::collection::vec(chain_op(), 0..40)
    ) {
        let mut wa = WorkAuthorization::new(VisaType::F1CptOpt, "OPT", None, None);
        wa.reset_chain();

        for op in &ops {
            apply(&mut wa, op);
        }

        // the chain prefix property: provisioned stages form a prefix of the
        // fixed order
        let provisioned: Vec<DocumentName> =
            wa.documents.iter().map(|d| d.name).collect();
        prop_assert_eq!(
            provisioned.as_slice(),
            &DocumentName::CHAIN[..provisioned.len()]
        );
    }
}
