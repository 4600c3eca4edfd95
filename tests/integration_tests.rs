//! Integration Tests for Onboard Core
//!
//! These tests verify cross-crate workflows and end-to-end scenarios that
//! involve multiple crates working together.

use std::sync::Arc;

use domain_employee::Employee;
use domain_onboarding::ports::mock::MockOnboardingStore;
use domain_onboarding::{
    ApplicationStatus, DocumentCriterion, DocumentName, DocumentStatus, OnboardingError,
    ReviewDecision, ReviewService,
};
use test_utils::{assert_chain, ApplicationBuilder, EmployeeBuilder};

mod onboarding_review_workflow {
    use super::*;

    async fn service_for(employee: &Employee) -> (ReviewService, MockOnboardingStore) {
        let store = MockOnboardingStore::with_employees(vec![employee.clone()]).await;
        (ReviewService::new(Arc::new(store.clone())), store)
    }

    /// Walks the full F1 onboarding lifecycle: registration, submission,
    /// application approval, and the three-stage document chain with one
    /// rejection round.
    #[tokio::test]
    async fn test_full_f1_onboarding_lifecycle() {
        let employee = EmployeeBuilder::new()
            .with_email("dana.osei@corp.example.com")
            .build();
        let (service, store) = service_for(&employee).await;

        // registration hook opens a blank application
        let opened = service
            .open_application(employee.id, employee.email.clone())
            .await
            .expect("open application");
        assert_eq!(opened.status, ApplicationStatus::NeverSubmitted);

        // the employee cannot submit an empty profile
        let err = service.submit_application(opened.id).await.unwrap_err();
        assert!(matches!(
            err,
            OnboardingError::IncompleteApplication { .. }
        ));

        // complete the profile out-of-band (the builder mirrors the form)
        let mut completed = ApplicationBuilder::new()
            .for_employee(&employee)
            .f1_visa()
            .build();
        completed.id = opened.id;
        completed.version = opened.version;
        completed.submit().expect("complete profile submits");
        store
            .save_application(&completed)
            .await
            .expect("persist submitted profile");

        // HR approves the application; the chain is seeded
        let approved = service
            .decide_application(opened.id, ReviewDecision::Approve)
            .await
            .expect("approve application");
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert_chain(
            &approved,
            &[(DocumentName::OptReceipt, DocumentStatus::NeverSubmitted)],
        );

        // the employee record received the projection
        let synced = store.get_employee(employee.id).await.unwrap();
        assert_eq!(synced.first_name, "Test");
        assert_eq!(synced.citizenship, "F1(CPT/OPT)");
        assert_eq!(synced.employment.title, "OPT");

        // OPT Receipt: upload then approve -> I-983 provisioned
        service
            .record_document_upload(opened.id, DocumentName::OptReceipt, "/files/opt.pdf")
            .await
            .unwrap();
        let after_opt = service
            .decide_document(opened.id, DocumentName::OptReceipt, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_chain(
            &after_opt,
            &[
                (DocumentName::OptReceipt, DocumentStatus::Approved),
                (DocumentName::I983, DocumentStatus::NeverSubmitted),
            ],
        );

        // I-983: upload, reject with feedback, re-upload, approve
        service
            .record_document_upload(opened.id, DocumentName::I983, "/files/i983.pdf")
            .await
            .unwrap();
        let rejected = service
            .decide_document(
                opened.id,
                DocumentName::I983,
                ReviewDecision::reject("blurry scan").unwrap(),
            )
            .await
            .unwrap();
        assert_chain(
            &rejected,
            &[
                (DocumentName::OptReceipt, DocumentStatus::Approved),
                (DocumentName::I983, DocumentStatus::Rejected),
            ],
        );

        service
            .record_document_upload(opened.id, DocumentName::I983, "/files/i983-v2.pdf")
            .await
            .unwrap();
        let after_i983 = service
            .decide_document(opened.id, DocumentName::I983, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_chain(
            &after_i983,
            &[
                (DocumentName::OptReceipt, DocumentStatus::Approved),
                (DocumentName::I983, DocumentStatus::Approved),
                (DocumentName::I20, DocumentStatus::NeverSubmitted),
            ],
        );

        // I-20: the terminal stage appends nothing
        service
            .record_document_upload(opened.id, DocumentName::I20, "/files/i20.pdf")
            .await
            .unwrap();
        let done = service
            .decide_document(opened.id, DocumentName::I20, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_chain(
            &done,
            &[
                (DocumentName::OptReceipt, DocumentStatus::Approved),
                (DocumentName::I983, DocumentStatus::Approved),
                (DocumentName::I20, DocumentStatus::Approved),
            ],
        );
        assert!(done.work_authorization.as_ref().unwrap().chain_complete());
    }

    /// A rejected application loops back through employee edits to Pending.
    #[tokio::test]
    async fn test_rejection_and_resubmission_loop() {
        let employee = EmployeeBuilder::new().build();
        let (service, store) = service_for(&employee).await;

        let application = ApplicationBuilder::new()
            .for_employee(&employee)
            .submitted()
            .build();
        store.insert_application(&application).await.unwrap();

        let rejected = service
            .decide_application(
                application.id,
                ReviewDecision::reject("SSN mismatch").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert_eq!(rejected.feedback.as_deref(), Some("SSN mismatch"));

        // the employee record is untouched by a rejection
        let untouched = store.get_employee(employee.id).await.unwrap();
        assert_eq!(untouched.ssn, "");

        let resubmitted = service.submit_application(application.id).await.unwrap();
        assert_eq!(resubmitted.status, ApplicationStatus::Pending);
        assert!(resubmitted.feedback.is_some(), "feedback kept until approval");
    }

    /// Approval is all-or-nothing: with no employee record to project onto,
    /// the status flip never persists.
    #[tokio::test]
    async fn test_approval_is_atomic_with_employee_sync() {
        let store = MockOnboardingStore::new();
        let service = ReviewService::new(Arc::new(store.clone()));

        let application = ApplicationBuilder::new().submitted().build();
        store.insert_application(&application).await.unwrap();

        let err = service
            .decide_application(application.id, ReviewDecision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, OnboardingError::EmployeeNotFound(_)));

        let stored = store.get_application(application.id).await.unwrap();
        assert_eq!(stored.status, ApplicationStatus::Pending);
    }

    /// The HR visa dashboard search AND-combines its criteria.
    #[tokio::test]
    async fn test_visa_status_search_across_applications() {
        let store = MockOnboardingStore::new();
        let service = ReviewService::new(Arc::new(store.clone()));

        for url in ["/files/a.pdf", "/files/b.pdf"] {
            let mut application = ApplicationBuilder::new().f1_visa().submitted().build();
            application.decide(&ReviewDecision::Approve).unwrap();
            if url == "/files/a.pdf" {
                application
                    .work_authorization
                    .as_mut()
                    .unwrap()
                    .record_upload(DocumentName::OptReceipt, url)
                    .unwrap();
            }
            store.insert_application(&application).await.unwrap();
        }

        let waiting_on_upload = service
            .search_applications(vec![DocumentCriterion::new(
                DocumentName::OptReceipt,
                DocumentStatus::NeverSubmitted,
            )])
            .await
            .unwrap();
        assert_eq!(waiting_on_upload.len(), 1);

        let in_review = service
            .search_applications(vec![DocumentCriterion::new(
                DocumentName::OptReceipt,
                DocumentStatus::Pending,
            )])
            .await
            .unwrap();
        assert_eq!(in_review.len(), 1);

        let nobody = service
            .search_applications(vec![
                DocumentCriterion::new(DocumentName::OptReceipt, DocumentStatus::Pending),
                DocumentCriterion::new(DocumentName::I983, DocumentStatus::Pending),
            ])
            .await
            .unwrap();
        assert!(nobody.is_empty());
    }
}
