//! Monthly royalty reporting.
//!
//! Royalties are earned on cash received: the report filters PAID payments by
//! `paid_at` within a half-open UTC calendar month, not by billing period.

pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use routes::router;
pub use services::{FranchiseeMonthlyReport, OwnerMonthlyReport};
