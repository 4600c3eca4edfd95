//! Employee Directory Domain
//!
//! This crate holds the persistent `Employee` record. The record is created
//! when an account is provisioned and receives a one-way projection of
//! finalized onboarding data at the moment an application is approved; after
//! that point it evolves independently of the application.

pub mod employee;
pub mod error;

pub use employee::{Employee, EmploymentSummary};
pub use error::EmployeeError;
