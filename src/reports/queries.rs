//! Database queries for royalty reports.
//!
//! Revenue is aggregated SQL-side per tenant; rounding and rollup happen in
//! `services`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;

/// One tenant's unrounded paid revenue within a report window
#[derive(Debug, Clone, FromRow)]
pub struct TenantRevenueRow {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub royalty_percent: Option<Decimal>,
    pub revenue: Decimal,
}

/// Franchisee fields needed by the franchisee report
#[derive(Debug, Clone, FromRow)]
pub struct FranchiseeRef {
    pub id: Uuid,
    pub name: String,
}

/// Paid revenue per tenant within `[window_start, window_end)`, filtered on
/// `paid_at`. Tenants with no paid payments appear with zero revenue.
pub async fn tenant_revenue(
    pool: &PgPool,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    franchisee_id: Option<Uuid>,
) -> Result<Vec<TenantRevenueRow>> {
    let rows = match franchisee_id {
        Some(franchisee) => {
            sqlx::query_as::<_, TenantRevenueRow>(
                r#"
                SELECT
                    t.id AS tenant_id,
                    t.name AS tenant_name,
                    t.franchisee_id,
                    f.name AS franchisee_name,
                    t.royalty_percent,
                    COALESCE(SUM(p.amount), 0) AS revenue
                FROM tenants t
                JOIN franchisees f ON f.id = t.franchisee_id
                LEFT JOIN payments p
                    ON p.tenant_id = t.id
                   AND p.status = 'paid'
                   AND p.paid_at >= $1
                   AND p.paid_at < $2
                WHERE t.franchisee_id = $3
                GROUP BY t.id, t.name, t.franchisee_id, f.name, t.royalty_percent
                ORDER BY t.name, t.id
                "#,
            )
            .bind(window_start)
            .bind(window_end)
            .bind(franchisee)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, TenantRevenueRow>(
                r#"
                SELECT
                    t.id AS tenant_id,
                    t.name AS tenant_name,
                    t.franchisee_id,
                    f.name AS franchisee_name,
                    t.royalty_percent,
                    COALESCE(SUM(p.amount), 0) AS revenue
                FROM tenants t
                JOIN franchisees f ON f.id = t.franchisee_id
                LEFT JOIN payments p
                    ON p.tenant_id = t.id
                   AND p.status = 'paid'
                   AND p.paid_at >= $1
                   AND p.paid_at < $2
                GROUP BY t.id, t.name, t.franchisee_id, f.name, t.royalty_percent
                ORDER BY t.name, t.id
                "#,
            )
            .bind(window_start)
            .bind(window_end)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Look up a franchisee by id
pub async fn find_franchisee(pool: &PgPool, franchisee_id: Uuid) -> Result<Option<FranchiseeRef>> {
    let franchisee = sqlx::query_as::<_, FranchiseeRef>(
        r#"
        SELECT id, name
        FROM franchisees
        WHERE id = $1
        "#,
    )
    .bind(franchisee_id)
    .fetch_optional(pool)
    .await?;

    Ok(franchisee)
}
