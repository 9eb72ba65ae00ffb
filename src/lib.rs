//! VeloPark back-office API library.
//!
//! Multi-tenant bicycle-rental administration: tenant-scoped access control,
//! weekly rent payment generation, debt ledger, and monthly royalty reports.

pub mod auth;
pub mod billing;
pub mod cache;
pub mod error;
pub mod reports;

use sqlx::PgPool;

use cache::AppCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
