//! Database models for the rental fleet and billing.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rental lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rental_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Active,
    Closed,
}

/// Payment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    WeeklyRent,
    Manual,
}

/// Payment status. The only legal transitions are planned -> paid and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Planned,
    Paid,
}

/// Tenant (rental point) from tenants
#[derive(Debug, Clone, FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub franchisee_id: Uuid,
    pub name: String,
    /// NULL means the network default (5%) applies at report time.
    pub royalty_percent: Option<Decimal>,
    pub is_active: bool,
}

/// Franchisee from franchisees
#[derive(Debug, Clone, FromRow)]
pub struct Franchisee {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

/// Rental from rentals
#[derive(Debug, Clone, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub bike_id: Uuid,
    pub client_id: Uuid,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub actual_end_date: Option<NaiveDate>,
    pub status: RentalStatus,
    pub weekly_rate_rub: Decimal,
}

impl Rental {
    /// End of the billable span: actual end once closed, planned end until then.
    pub fn billing_stop(&self) -> NaiveDate {
        self.actual_end_date.unwrap_or(self.planned_end_date)
    }
}

/// One outstanding payment with its rental context, as read by the debt ledger
#[derive(Debug, Clone, FromRow)]
pub struct DebtItem {
    pub payment_id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub due_at: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub client_name: String,
    pub client_phone: String,
    pub bike_code: String,
}
