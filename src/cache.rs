//! In-memory caching using moka
//!
//! Caches tenant rows consulted by the access guard on every tenant-scoped
//! request. The TTL is kept short so administrative changes (tenant
//! deactivation, franchise transfer) propagate within a minute.
//! User-tenant bindings are deliberately never cached: a freshly granted
//! binding must take effect on the next request.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::auth::models::TenantRef;

/// Application cache holding guard lookup data
#[derive(Clone)]
pub struct AppCache {
    /// Tenant rows used by the access guard (tenant id -> TenantRef)
    pub tenants: Cache<Uuid, Arc<TenantRef>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Tenants: the whole network fits comfortably; 60 s TTL
            tenants: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(Duration::from_secs(60))
                .build(),
        }
    }

    /// Get cache statistics for the health endpoint
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tenants_size: self.tenants.entry_count(),
        }
    }

}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub tenants_size: u64,
}
