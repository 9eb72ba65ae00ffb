//! Royalty report assembly.
//!
//! The database hands back unrounded per-tenant revenue; everything monetary
//! from there on is rounded independently at the point it is computed, so
//! per-row figures are reproducible. Totals are sums of already-rounded
//! values by design.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::billing::calculators::{month_window, round2};
use crate::error::{AppError, Result};

use super::queries::{self, TenantRevenueRow};

/// Network default applied when a tenant has no explicit royalty percent
fn default_royalty_percent() -> Decimal {
    Decimal::from(5)
}

/// One tenant's royalty line
#[derive(Debug, Clone)]
pub struct TenantRoyaltyRow {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub revenue_rub: Decimal,
    pub royalty_percent: Decimal,
    pub royalty_due_rub: Decimal,
}

/// One franchisee's rollup of tenant lines
#[derive(Debug, Clone)]
pub struct FranchiseeRollup {
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub tenant_count: u32,
    pub revenue_rub: Decimal,
    pub royalty_due_rub: Decimal,
    pub tenants: Vec<TenantRoyaltyRow>,
}

/// Owner's network-wide monthly report
#[derive(Debug, Clone)]
pub struct OwnerMonthlyReport {
    pub month: String,
    pub franchisees: Vec<FranchiseeRollup>,
    pub total_revenue_rub: Decimal,
    pub total_royalty_due_rub: Decimal,
}

/// One franchisee's monthly report
#[derive(Debug, Clone)]
pub struct FranchiseeMonthlyReport {
    pub month: String,
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub tenants: Vec<TenantRoyaltyRow>,
    pub revenue_rub: Decimal,
    pub royalty_due_rub: Decimal,
}

/// Turn raw revenue rows into royalty lines.
///
/// Revenue is rounded per tenant, then the royalty is computed on the rounded
/// figure and rounded again. Zero-revenue tenants are dropped unless
/// `include_zero`.
pub fn build_tenant_rows(rows: Vec<TenantRevenueRow>, include_zero: bool) -> Vec<TenantRoyaltyRow> {
    rows.into_iter()
        .filter_map(|row| {
            let revenue = round2(row.revenue);
            if revenue.is_zero() && !include_zero {
                return None;
            }
            let percent = row.royalty_percent.unwrap_or_else(default_royalty_percent);
            let royalty = round2(revenue * percent / Decimal::from(100));
            Some(TenantRoyaltyRow {
                tenant_id: row.tenant_id,
                tenant_name: row.tenant_name,
                franchisee_id: row.franchisee_id,
                franchisee_name: row.franchisee_name,
                revenue_rub: revenue,
                royalty_percent: percent,
                royalty_due_rub: royalty,
            })
        })
        .collect()
}

/// Group tenant lines by franchisee, sorted by franchisee display name
/// (case-insensitive, id as tie-break).
pub fn rollup_franchisees(rows: Vec<TenantRoyaltyRow>) -> Vec<FranchiseeRollup> {
    let mut by_franchisee: HashMap<Uuid, FranchiseeRollup> = HashMap::new();

    for row in rows {
        let rollup = by_franchisee
            .entry(row.franchisee_id)
            .or_insert_with(|| FranchiseeRollup {
                franchisee_id: row.franchisee_id,
                franchisee_name: row.franchisee_name.clone(),
                tenant_count: 0,
                revenue_rub: Decimal::ZERO,
                royalty_due_rub: Decimal::ZERO,
                tenants: Vec::new(),
            });
        rollup.tenant_count += 1;
        rollup.revenue_rub += row.revenue_rub;
        rollup.royalty_due_rub += row.royalty_due_rub;
        rollup.tenants.push(row);
    }

    let mut rollups: Vec<FranchiseeRollup> = by_franchisee
        .into_values()
        .map(|mut rollup| {
            rollup.revenue_rub = round2(rollup.revenue_rub);
            rollup.royalty_due_rub = round2(rollup.royalty_due_rub);
            rollup
        })
        .collect();

    rollups.sort_by(|a, b| {
        a.franchisee_name
            .to_lowercase()
            .cmp(&b.franchisee_name.to_lowercase())
            .then_with(|| a.franchisee_id.cmp(&b.franchisee_id))
    });

    rollups
}

fn month_label(window_start: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", window_start.year(), window_start.month())
}

/// Network-wide monthly royalty report (owner only; gated at the route)
pub async fn owner_monthly_report(
    pool: &PgPool,
    month: Option<&str>,
    include_zero: bool,
    now: DateTime<Utc>,
) -> Result<OwnerMonthlyReport> {
    let (window_start, window_end) = month_window(month, now)?;

    let revenue_rows = queries::tenant_revenue(pool, window_start, window_end, None).await?;
    let tenant_rows = build_tenant_rows(revenue_rows, include_zero);

    let total_revenue_rub = round2(tenant_rows.iter().map(|r| r.revenue_rub).sum());
    let total_royalty_due_rub = round2(tenant_rows.iter().map(|r| r.royalty_due_rub).sum());

    Ok(OwnerMonthlyReport {
        month: month_label(window_start),
        franchisees: rollup_franchisees(tenant_rows),
        total_revenue_rub,
        total_royalty_due_rub,
    })
}

/// Monthly royalty report for a single franchisee (own franchise only; gated
/// at the route)
pub async fn franchisee_monthly_report(
    pool: &PgPool,
    franchisee_id: Uuid,
    month: Option<&str>,
    include_zero: bool,
    now: DateTime<Utc>,
) -> Result<FranchiseeMonthlyReport> {
    let (window_start, window_end) = month_window(month, now)?;

    let franchisee = queries::find_franchisee(pool, franchisee_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let revenue_rows =
        queries::tenant_revenue(pool, window_start, window_end, Some(franchisee_id)).await?;
    let tenants = build_tenant_rows(revenue_rows, include_zero);

    let revenue_rub = round2(tenants.iter().map(|r| r.revenue_rub).sum());
    let royalty_due_rub = round2(tenants.iter().map(|r| r.royalty_due_rub).sum());

    Ok(FranchiseeMonthlyReport {
        month: month_label(window_start),
        franchisee_id: franchisee.id,
        franchisee_name: franchisee.name,
        tenants,
        revenue_rub,
        royalty_due_rub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn revenue_row(
        franchisee_id: Uuid,
        franchisee_name: &str,
        tenant_name: &str,
        percent: Option<Decimal>,
        revenue: Decimal,
    ) -> TenantRevenueRow {
        TenantRevenueRow {
            tenant_id: Uuid::new_v4(),
            tenant_name: tenant_name.to_string(),
            franchisee_id,
            franchisee_name: franchisee_name.to_string(),
            royalty_percent: percent,
            revenue,
        }
    }

    #[test]
    fn test_royalty_rounding_per_tenant() {
        let franchise = Uuid::new_v4();
        let rows = vec![revenue_row(
            franchise,
            "Nord",
            "Center",
            Some(dec!(5)),
            dec!(333.33),
        )];

        let built = build_tenant_rows(rows, false);
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].revenue_rub, dec!(333.33));
        // round2(333.33 * 0.05) = round2(16.6665) = 16.67
        assert_eq!(built[0].royalty_due_rub, dec!(16.67));
    }

    #[test]
    fn test_default_royalty_percent_is_five() {
        let franchise = Uuid::new_v4();
        let rows = vec![revenue_row(franchise, "Nord", "Center", None, dec!(1000))];

        let built = build_tenant_rows(rows, false);
        assert_eq!(built[0].royalty_percent, dec!(5));
        assert_eq!(built[0].royalty_due_rub, dec!(50.00));
    }

    #[test]
    fn test_zero_revenue_tenants_dropped_unless_included() {
        let franchise = Uuid::new_v4();
        let rows = vec![
            revenue_row(franchise, "Nord", "Center", Some(dec!(5)), dec!(0)),
            revenue_row(franchise, "Nord", "Station", Some(dec!(5)), dec!(100)),
        ];

        let dropped = build_tenant_rows(rows.clone(), false);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].tenant_name, "Station");

        let kept = build_tenant_rows(rows, true);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].royalty_due_rub, dec!(0.00));
    }

    #[test]
    fn test_franchisee_rollup_sums_rounded_rows() {
        // Two tenants at 16.67 each: the rollup is 33.34 regardless of the
        // exact unrounded sum (2 * 16.6665 = 33.333).
        let franchise = Uuid::new_v4();
        let rows = build_tenant_rows(
            vec![
                revenue_row(franchise, "Nord", "Center", Some(dec!(5)), dec!(333.33)),
                revenue_row(franchise, "Nord", "Station", Some(dec!(5)), dec!(333.33)),
            ],
            false,
        );

        let rollups = rollup_franchisees(rows);
        assert_eq!(rollups.len(), 1);
        assert_eq!(rollups[0].tenant_count, 2);
        assert_eq!(rollups[0].revenue_rub, dec!(666.66));
        assert_eq!(rollups[0].royalty_due_rub, dec!(33.34));
    }

    #[test]
    fn test_rollup_sorted_by_name_case_insensitive() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let rows = build_tenant_rows(
            vec![
                revenue_row(a, "west", "T1", Some(dec!(5)), dec!(10)),
                revenue_row(b, "East", "T2", Some(dec!(5)), dec!(10)),
                revenue_row(c, "NORD", "T3", Some(dec!(5)), dec!(10)),
            ],
            false,
        );

        let rollups = rollup_franchisees(rows);
        let names: Vec<&str> = rollups.iter().map(|r| r.franchisee_name.as_str()).collect();
        assert_eq!(names, vec!["East", "NORD", "west"]);
    }

    #[test]
    fn test_month_label() {
        use chrono::TimeZone;
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(month_label(start), "2024-03");
    }
}
