//! Database queries for the access guard

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::models::TenantRef;

/// Look up the tenant fields the guard needs
pub async fn find_tenant_ref(pool: &PgPool, tenant_id: Uuid) -> Result<Option<TenantRef>> {
    let tenant = sqlx::query_as::<_, TenantRef>(
        r#"
        SELECT id, franchisee_id
        FROM tenants
        WHERE id = $1
        "#,
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?;

    Ok(tenant)
}

/// Check whether a user is explicitly bound to a tenant
pub async fn binding_exists(pool: &PgPool, user_id: Uuid, tenant_id: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM user_tenant_bindings
            WHERE user_id = $1 AND tenant_id = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(tenant_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
