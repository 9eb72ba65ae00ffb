//! Response DTOs for billing API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::DebtItem;
use super::services::{
    DebtLedger, GenerationSummary, NetworkGenerationSummary, RentalGeneration, TenantGeneration,
};

/// Per-rental tally in a generation response
#[derive(Debug, Serialize)]
pub struct RentalGenerationResponse {
    pub rental_id: Uuid,
    pub created: u32,
    pub skipped: u32,
}

/// Response for tenant-scoped weekly generation
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub created: u32,
    pub skipped: u32,
    pub details: Vec<RentalGenerationResponse>,
}

impl From<GenerationSummary> for GenerationResponse {
    fn from(summary: GenerationSummary) -> Self {
        Self {
            created: summary.created,
            skipped: summary.skipped,
            details: summary.details.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RentalGeneration> for RentalGenerationResponse {
    fn from(tally: RentalGeneration) -> Self {
        Self {
            rental_id: tally.rental_id,
            created: tally.created,
            skipped: tally.skipped,
        }
    }
}

/// Per-tenant tally in an owner-wide generation response
#[derive(Debug, Serialize)]
pub struct TenantGenerationResponse {
    pub tenant_id: Uuid,
    pub created: u32,
    pub skipped: u32,
}

/// Response for owner-wide weekly generation
#[derive(Debug, Serialize)]
pub struct NetworkGenerationResponse {
    pub created: u32,
    pub skipped: u32,
    pub tenants: Vec<TenantGenerationResponse>,
}

impl From<NetworkGenerationSummary> for NetworkGenerationResponse {
    fn from(summary: NetworkGenerationSummary) -> Self {
        Self {
            created: summary.created,
            skipped: summary.skipped,
            tenants: summary.tenants.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TenantGeneration> for TenantGenerationResponse {
    fn from(tally: TenantGeneration) -> Self {
        Self {
            tenant_id: tally.tenant_id,
            created: tally.created,
            skipped: tally.skipped,
        }
    }
}

/// One outstanding payment in the debt ledger
#[derive(Debug, Serialize)]
pub struct DebtItemResponse {
    pub payment_id: Uuid,
    pub rental_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub due_at: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub client_name: String,
    pub client_phone: String,
    pub bike_code: String,
}

impl From<DebtItem> for DebtItemResponse {
    fn from(item: DebtItem) -> Self {
        Self {
            payment_id: item.payment_id,
            rental_id: item.rental_id,
            amount: item.amount,
            due_at: item.due_at,
            period_start: item.period_start,
            period_end: item.period_end,
            created_at: item.created_at,
            client_name: item.client_name,
            client_phone: item.client_phone,
            bike_code: item.bike_code,
        }
    }
}

/// Response for the debt ledger
#[derive(Debug, Serialize)]
pub struct DebtLedgerResponse {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_debt_rub: Decimal,
    pub items: Vec<DebtItemResponse>,
}

impl From<DebtLedger> for DebtLedgerResponse {
    fn from(ledger: DebtLedger) -> Self {
        Self {
            count: ledger.count,
            total_debt_rub: ledger.total_debt_rub,
            items: ledger.items.into_iter().map(Into::into).collect(),
        }
    }
}
