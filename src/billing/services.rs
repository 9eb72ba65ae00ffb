//! Billing service functions with database access.
//!
//! All tenant-scoped entry points take a `TenantScope` produced by the access
//! guard; raw tenant ids never reach this layer from a request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::TenantScope;
use crate::error::{AppError, Result};

use super::calculators::{round2, total_debt, weekly_blocks};
use super::models::DebtItem;
use super::queries;

/// Per-rental generation tally
#[derive(Debug, Clone)]
pub struct RentalGeneration {
    pub rental_id: Uuid,
    pub created: u32,
    pub skipped: u32,
}

/// Result of weekly payment generation for one tenant
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    pub created: u32,
    pub skipped: u32,
    pub details: Vec<RentalGeneration>,
}

/// Per-tenant tally within an owner-wide generation run
#[derive(Debug, Clone)]
pub struct TenantGeneration {
    pub tenant_id: Uuid,
    pub created: u32,
    pub skipped: u32,
}

/// Result of owner-wide weekly payment generation
#[derive(Debug, Clone, Default)]
pub struct NetworkGenerationSummary {
    pub created: u32,
    pub skipped: u32,
    pub tenants: Vec<TenantGeneration>,
}

/// The tenant's outstanding debt
#[derive(Debug, Clone)]
pub struct DebtLedger {
    pub count: usize,
    pub total_debt_rub: Decimal,
    pub items: Vec<DebtItem>,
}

/// Generate weekly rent payments for every active rental of the tenant whose
/// natural 7-day blocks overlap `[from, to)`.
///
/// Idempotent: a block already materialized (by any earlier or concurrent
/// run) counts as skipped, enforced by the unique index on
/// (tenant_id, rental_id, period_start). A rental with a non-positive weekly
/// rate is skipped as a whole - billing is paused for it.
///
/// A storage failure mid-batch propagates; rentals processed before the
/// failure keep their payments and the identical call can simply be retried.
pub async fn generate_weekly(
    pool: &PgPool,
    scope: &TenantScope,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<GenerationSummary> {
    if to <= from {
        return Err(AppError::InvalidRange(format!(
            "'to' ({to}) must be after 'from' ({from})"
        )));
    }

    let rentals = queries::list_active_rentals(pool, scope.tenant_id()).await?;

    let mut summary = GenerationSummary::default();
    for rental in rentals {
        let mut tally = RentalGeneration {
            rental_id: rental.id,
            created: 0,
            skipped: 0,
        };

        if rental.weekly_rate_rub <= Decimal::ZERO {
            tally.skipped = 1;
        } else {
            let amount = round2(rental.weekly_rate_rub);
            for block in weekly_blocks(rental.start_date, rental.billing_stop(), from, to) {
                let created = queries::insert_weekly_payment(
                    pool,
                    scope.tenant_id(),
                    rental.id,
                    amount,
                    block.start,
                    block.end,
                )
                .await?;
                if created {
                    tally.created += 1;
                } else {
                    tally.skipped += 1;
                }
            }
        }

        summary.created += tally.created;
        summary.skipped += tally.skipped;
        summary.details.push(tally);
    }

    tracing::info!(
        tenant_id = %scope.tenant_id(),
        %from,
        %to,
        created = summary.created,
        skipped = summary.skipped,
        "weekly payment generation finished"
    );

    Ok(summary)
}

/// Owner-wide variant: run weekly generation for every active tenant.
///
/// Per-tenant semantics are identical to [`generate_weekly`]; counts are
/// aggregated across tenants.
pub async fn generate_weekly_all_tenants(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<NetworkGenerationSummary> {
    if to <= from {
        return Err(AppError::InvalidRange(format!(
            "'to' ({to}) must be after 'from' ({from})"
        )));
    }

    let tenant_ids = queries::list_active_tenant_ids(pool).await?;

    let mut summary = NetworkGenerationSummary::default();
    for tenant_id in tenant_ids {
        let scope = TenantScope::for_owner_iteration(tenant_id);
        let tenant_summary = generate_weekly(pool, &scope, from, to).await?;
        summary.created += tenant_summary.created;
        summary.skipped += tenant_summary.skipped;
        summary.tenants.push(TenantGeneration {
            tenant_id,
            created: tenant_summary.created,
            skipped: tenant_summary.skipped,
        });
    }

    Ok(summary)
}

/// Outstanding (planned) payments of the tenant, earliest due first.
///
/// `overdue_only` keeps payments due strictly before `today`; the cutoff is
/// evaluated at call time, it is not a stored flag. Due dates are calendar
/// dates, so the comparison is at date granularity: a payment due today
/// becomes overdue at the next UTC midnight, not at some intra-day moment.
pub async fn list_debts(
    pool: &PgPool,
    scope: &TenantScope,
    overdue_only: bool,
    today: NaiveDate,
) -> Result<DebtLedger> {
    let cutoff = overdue_only.then_some(today);
    let items = queries::list_planned_payments(pool, scope.tenant_id(), cutoff).await?;

    Ok(DebtLedger {
        count: items.len(),
        total_debt_rub: total_debt(items.iter().map(|i| i.amount)),
        items,
    })
}

/// Mark a planned payment paid, recording when and by whom
pub async fn mark_paid(
    pool: &PgPool,
    scope: &TenantScope,
    payment_id: Uuid,
    marked_by: Uuid,
) -> Result<()> {
    let affected = queries::mark_paid(
        pool,
        scope.tenant_id(),
        payment_id,
        marked_by,
        chrono::Utc::now(),
    )
    .await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Revert a paid payment to planned, clearing paid_at and marked_by_id
pub async fn mark_planned(pool: &PgPool, scope: &TenantScope, payment_id: Uuid) -> Result<()> {
    let affected = queries::mark_planned(pool, scope.tenant_id(), payment_id).await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
