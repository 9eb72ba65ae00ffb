//! Response DTOs for report endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::services::{
    FranchiseeMonthlyReport, FranchiseeRollup, OwnerMonthlyReport, TenantRoyaltyRow,
};

/// One tenant's royalty line
#[derive(Debug, Serialize)]
pub struct TenantRoyaltyResponse {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue_rub: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub royalty_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub royalty_due_rub: Decimal,
}

impl From<TenantRoyaltyRow> for TenantRoyaltyResponse {
    fn from(row: TenantRoyaltyRow) -> Self {
        Self {
            tenant_id: row.tenant_id,
            tenant_name: row.tenant_name,
            revenue_rub: row.revenue_rub,
            royalty_percent: row.royalty_percent,
            royalty_due_rub: row.royalty_due_rub,
        }
    }
}

/// One franchisee's rollup in the owner report
#[derive(Debug, Serialize)]
pub struct FranchiseeRollupResponse {
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub tenant_count: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue_rub: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub royalty_due_rub: Decimal,
    pub tenants: Vec<TenantRoyaltyResponse>,
}

impl From<FranchiseeRollup> for FranchiseeRollupResponse {
    fn from(rollup: FranchiseeRollup) -> Self {
        Self {
            franchisee_id: rollup.franchisee_id,
            franchisee_name: rollup.franchisee_name,
            tenant_count: rollup.tenant_count,
            revenue_rub: rollup.revenue_rub,
            royalty_due_rub: rollup.royalty_due_rub,
            tenants: rollup.tenants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for the owner's network-wide report
#[derive(Debug, Serialize)]
pub struct OwnerMonthlyReportResponse {
    pub month: String,
    pub franchisees: Vec<FranchiseeRollupResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_revenue_rub: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_royalty_due_rub: Decimal,
}

impl From<OwnerMonthlyReport> for OwnerMonthlyReportResponse {
    fn from(report: OwnerMonthlyReport) -> Self {
        Self {
            month: report.month,
            franchisees: report.franchisees.into_iter().map(Into::into).collect(),
            total_revenue_rub: report.total_revenue_rub,
            total_royalty_due_rub: report.total_royalty_due_rub,
        }
    }
}

/// Response for a single franchisee's report
#[derive(Debug, Serialize)]
pub struct FranchiseeMonthlyReportResponse {
    pub month: String,
    pub franchisee_id: Uuid,
    pub franchisee_name: String,
    pub tenants: Vec<TenantRoyaltyResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue_rub: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub royalty_due_rub: Decimal,
}

impl From<FranchiseeMonthlyReport> for FranchiseeMonthlyReportResponse {
    fn from(report: FranchiseeMonthlyReport) -> Self {
        Self {
            month: report.month,
            franchisee_id: report.franchisee_id,
            franchisee_name: report.franchisee_name,
            tenants: report.tenants.into_iter().map(Into::into).collect(),
            revenue_rub: report.revenue_rub,
            royalty_due_rub: report.royalty_due_rub,
        }
    }
}
