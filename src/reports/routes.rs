//! Report route handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::Result;
use crate::AppState;

use super::requests::MonthlyReportQuery;
use super::responses::{FranchiseeMonthlyReportResponse, OwnerMonthlyReportResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/owner/monthly", get(owner_monthly))
        .route("/franchisees/:franchisee_id/monthly", get(franchisee_monthly))
}

/// Network-wide monthly royalty report (owner only)
async fn owner_monthly(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<OwnerMonthlyReportResponse>> {
    principal.require_owner()?;
    let report = services::owner_monthly_report(
        &state.db,
        query.month.as_deref(),
        query.include_zero,
        Utc::now(),
    )
    .await?;
    Ok(Json(report.into()))
}

/// Monthly royalty report for the caller's own franchise
async fn franchisee_monthly(
    State(state): State<AppState>,
    principal: Principal,
    Path(franchisee_id): Path<Uuid>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<FranchiseeMonthlyReportResponse>> {
    principal.require_franchisee(franchisee_id)?;
    let report = services::franchisee_monthly_report(
        &state.db,
        franchisee_id,
        query.month.as_deref(),
        query.include_zero,
        Utc::now(),
    )
    .await?;
    Ok(Json(report.into()))
}
