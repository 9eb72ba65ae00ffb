//! Billing route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{self, Principal};
use crate::error::Result;
use crate::AppState;

use super::requests::{DebtQuery, GenerateWeeklyRequest};
use super::responses::{DebtLedgerResponse, GenerationResponse, NetworkGenerationResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/:tenant_id/payments/generate-weekly",
            post(generate_weekly),
        )
        .route("/payments/generate-weekly", post(generate_weekly_all))
        .route("/tenants/:tenant_id/debts", get(list_debts))
        .route(
            "/tenants/:tenant_id/payments/:payment_id/mark-paid",
            post(mark_paid),
        )
        .route(
            "/tenants/:tenant_id/payments/:payment_id/mark-planned",
            post(mark_planned),
        )
}

/// Generate weekly rent payments for one tenant
async fn generate_weekly(
    State(state): State<AppState>,
    principal: Principal,
    Path(tenant_id): Path<Uuid>,
    Json(req): Json<GenerateWeeklyRequest>,
) -> Result<Json<GenerationResponse>> {
    let scope = auth::authorize(&state.db, &state.cache, &principal, Some(tenant_id)).await?;
    let summary = services::generate_weekly(&state.db, &scope, req.from, req.to).await?;
    Ok(Json(summary.into()))
}

/// Generate weekly rent payments for every active tenant (owner only)
async fn generate_weekly_all(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<GenerateWeeklyRequest>,
) -> Result<Json<NetworkGenerationResponse>> {
    principal.require_owner()?;
    let summary = services::generate_weekly_all_tenants(&state.db, req.from, req.to).await?;
    Ok(Json(summary.into()))
}

/// Outstanding payments for one tenant
async fn list_debts(
    State(state): State<AppState>,
    principal: Principal,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<DebtQuery>,
) -> Result<Json<DebtLedgerResponse>> {
    let scope = auth::authorize(&state.db, &state.cache, &principal, Some(tenant_id)).await?;
    let ledger = services::list_debts(
        &state.db,
        &scope,
        query.overdue_only,
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(ledger.into()))
}

/// Mark a planned payment as paid
async fn mark_paid(
    State(state): State<AppState>,
    principal: Principal,
    Path((tenant_id, payment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    let scope = auth::authorize(&state.db, &state.cache, &principal, Some(tenant_id)).await?;
    services::mark_paid(&state.db, &scope, payment_id, principal.user_id).await?;
    Ok(Json(serde_json::json!({ "status": "paid" })))
}

/// Revert a paid payment to planned
async fn mark_planned(
    State(state): State<AppState>,
    principal: Principal,
    Path((tenant_id, payment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    let scope = auth::authorize(&state.db, &state.cache, &principal, Some(tenant_id)).await?;
    services::mark_planned(&state.db, &scope, payment_id).await?;
    Ok(Json(serde_json::json!({ "status": "planned" })))
}
