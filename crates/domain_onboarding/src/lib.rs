//! Onboarding Domain
//!
//! This crate implements the onboarding application lifecycle from
//! registration through submission, HR review, and the work-authorization
//! document chain.
//!
//! # Application Lifecycle
//!
//! ```text
//! NeverSubmitted -> Pending -> Approved
//!       ^             |
//!       |             v
//!       +--------- Rejected (editable, resubmittable)
//! ```
//!
//! # Document Chain (F1 CPT/OPT only)
//!
//! ```text
//! OPT Receipt -> I-983 -> I-20
//! ```
//!
//! Approving the application seeds the chain with a single OPT Receipt slot;
//! approving each document provisions the next stage. Rejected documents are
//! re-uploaded by the employee, which returns them to Pending.

pub mod application;
pub mod decision;
pub mod document;
pub mod error;
pub mod ports;
pub mod review;
pub mod sync;
pub mod work_authorization;

pub use application::{Application, ApplicationStatus, CitizenshipStatus, ProfilePatch};
pub use decision::ReviewDecision;
pub use document::{DocumentName, DocumentRecord, DocumentStatus};
pub use error::OnboardingError;
pub use ports::{CitizenshipDeclaration, DocumentCriterion, OnboardingStore, VisaDeclaration};
pub use review::ReviewService;
pub use work_authorization::{VisaType, WorkAuthorization};
