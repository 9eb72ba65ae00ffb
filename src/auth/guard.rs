//! Tenant access guard.
//!
//! Every tenant-scoped operation goes through [`authorize`] first. On success
//! the caller receives a [`TenantScope`] — the only way a tenant id reaches
//! the billing and report services. Data access is always filtered by the
//! scope's tenant id, never by a client-supplied id taken at face value.

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, Result};

use super::models::{Principal, Role, TenantRef};
use super::queries;

/// Proof that a principal was authorized for a tenant.
#[derive(Debug, Clone)]
pub struct TenantScope(Uuid);

impl TenantScope {
    pub fn tenant_id(&self) -> Uuid {
        self.0
    }

    /// Scope over a tenant enumerated by an owner-wide administrative
    /// operation. Callers must have passed `Principal::require_owner` first.
    pub(crate) fn for_owner_iteration(tenant_id: Uuid) -> Self {
        TenantScope(tenant_id)
    }
}

/// The access decision, separated from IO so it is unit-testable.
///
/// `has_binding` is only consulted for manager/mechanic principals.
pub fn decide(principal: &Principal, tenant: &TenantRef, has_binding: bool) -> bool {
    match principal.role {
        Role::Owner => true,
        Role::Franchisee => principal.home_franchisee_id == Some(tenant.franchisee_id),
        Role::Manager | Role::Mechanic => has_binding,
    }
}

/// Authorize a principal against a tenant and bind the tenant id.
///
/// `None` means the caller did not supply a tenant id at all, which is a
/// distinct client error from an id that resolves to nothing.
pub async fn authorize(
    pool: &PgPool,
    cache: &AppCache,
    principal: &Principal,
    tenant_id: Option<Uuid>,
) -> Result<TenantScope> {
    let tenant_id = tenant_id.ok_or(AppError::MissingTenant)?;

    let tenant = match cache.tenants.get(&tenant_id).await {
        Some(tenant) => tenant,
        None => {
            let tenant = queries::find_tenant_ref(pool, tenant_id)
                .await?
                .ok_or(AppError::InvalidTenant)?;
            let tenant = Arc::new(tenant);
            cache.tenants.insert(tenant_id, tenant.clone()).await;
            tenant
        }
    };

    // Bindings are checked live so a fresh grant takes effect immediately.
    let has_binding = match principal.role {
        Role::Manager | Role::Mechanic => {
            queries::binding_exists(pool, principal.user_id, tenant_id).await?
        }
        Role::Owner | Role::Franchisee => false,
    };

    if decide(principal, &tenant, has_binding) {
        Ok(TenantScope(tenant_id))
    } else {
        Err(AppError::Forbidden)
    }
}
