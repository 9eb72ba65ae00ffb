//! Database queries for billing.
//!
//! Every statement here filters by tenant id; the id always comes from an
//! authorized `TenantScope`, never straight from the request.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::models::{DebtItem, Rental};

/// Active rentals of a tenant, in deterministic generation order
pub async fn list_active_rentals(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Rental>> {
    let rentals = sqlx::query_as::<_, Rental>(
        r#"
        SELECT
            id, tenant_id, bike_id, client_id,
            start_date, planned_end_date, actual_end_date,
            status, weekly_rate_rub
        FROM rentals
        WHERE tenant_id = $1
          AND status = 'active'
        ORDER BY start_date, id
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(rentals)
}

/// Insert one weekly-rent payment for a rental block.
///
/// The partial unique index on (tenant_id, rental_id, period_start) is the
/// correctness guarantee against concurrent generation: the insert either
/// lands or hits the index and affects zero rows. Returns whether a row was
/// created.
pub async fn insert_weekly_payment(
    pool: &PgPool,
    tenant_id: Uuid,
    rental_id: Uuid,
    amount: Decimal,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO payments
            (id, tenant_id, rental_id, amount, kind, status, due_at, period_start, period_end)
        VALUES
            ($1, $2, $3, $4, 'weekly_rent', 'planned', $5, $5, $6)
        ON CONFLICT (tenant_id, rental_id, period_start) WHERE kind = 'weekly_rent'
        DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(rental_id)
    .bind(amount)
    .bind(period_start)
    .bind(period_end)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Ids of all active tenants, for owner-wide generation
pub async fn list_active_tenant_ids(pool: &PgPool) -> Result<Vec<Uuid>> {
    let ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM tenants
        WHERE is_active
        ORDER BY name, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Outstanding (planned) payments of a tenant with their rental context,
/// earliest due first
pub async fn list_planned_payments(
    pool: &PgPool,
    tenant_id: Uuid,
    due_before: Option<NaiveDate>,
) -> Result<Vec<DebtItem>> {
    let items = match due_before {
        Some(cutoff) => {
            sqlx::query_as::<_, DebtItem>(
                r#"
                SELECT
                    p.id AS payment_id,
                    p.rental_id,
                    p.amount,
                    p.due_at,
                    p.period_start,
                    p.period_end,
                    p.created_at,
                    c.full_name AS client_name,
                    c.phone AS client_phone,
                    b.code AS bike_code
                FROM payments p
                JOIN rentals r ON r.id = p.rental_id
                JOIN clients c ON c.id = r.client_id
                JOIN bikes b ON b.id = r.bike_id
                WHERE p.tenant_id = $1
                  AND p.status = 'planned'
                  AND p.due_at < $2
                ORDER BY p.due_at, p.created_at
                "#,
            )
            .bind(tenant_id)
            .bind(cutoff)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DebtItem>(
                r#"
                SELECT
                    p.id AS payment_id,
                    p.rental_id,
                    p.amount,
                    p.due_at,
                    p.period_start,
                    p.period_end,
                    p.created_at,
                    c.full_name AS client_name,
                    c.phone AS client_phone,
                    b.code AS bike_code
                FROM payments p
                JOIN rentals r ON r.id = p.rental_id
                JOIN clients c ON c.id = r.client_id
                JOIN bikes b ON b.id = r.bike_id
                WHERE p.tenant_id = $1
                  AND p.status = 'planned'
                ORDER BY p.due_at, p.created_at
                "#,
            )
            .bind(tenant_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(items)
}

/// Transition planned -> paid as a single scoped update.
///
/// Returns affected rows: 0 means no planned payment with that id exists in
/// the tenant's scope.
pub async fn mark_paid(
    pool: &PgPool,
    tenant_id: Uuid,
    payment_id: Uuid,
    marked_by: Uuid,
    paid_at: DateTime<Utc>,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE payments
        SET status = 'paid', paid_at = $1, marked_by_id = $2
        WHERE id = $3
          AND tenant_id = $4
          AND status = 'planned'
        "#,
    )
    .bind(paid_at)
    .bind(marked_by)
    .bind(payment_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Transition paid -> planned, clearing paid_at and marked_by_id
pub async fn mark_planned(pool: &PgPool, tenant_id: Uuid, payment_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE payments
        SET status = 'planned', paid_at = NULL, marked_by_id = NULL
        WHERE id = $1
          AND tenant_id = $2
          AND status = 'paid'
        "#,
    )
    .bind(payment_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
