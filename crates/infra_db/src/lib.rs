//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL adapter for the onboarding system
//! using SQLx.
//!
//! # Architecture
//!
//! `PgOnboardingStore` implements the `OnboardingStore` port from
//! `domain_onboarding`. Each aggregate is stored as one row (key columns for
//! indexing plus a JSONB body), matching the single-document atomic-update
//! model the workflow relies on. Optimistic-concurrency versions are checked
//! in the UPDATE's WHERE clause, and the approval dual-write runs in one
//! transaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgOnboardingStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/onboarding")).await?;
//! let store = PgOnboardingStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod store;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use store::PgOnboardingStore;
