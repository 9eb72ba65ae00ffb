//! Billing module: weekly rent generation, debt ledger, payment status.
//!
//! Payments are generated in natural 7-day blocks anchored at each rental's
//! start date; the database's unique index on weekly-rent periods makes
//! generation idempotent and race-free.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::round2;
pub use routes::router;
pub use services::{GenerationSummary, NetworkGenerationSummary};
