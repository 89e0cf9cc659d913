//! Audit API Handlers
//!
//! 管理员的审核入口：筛选列表、打开前后对比视图、落地决定。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use shared::client::{ApplicationReview, AuditDecisionRequest};
use shared::models::application::ApplicationLog;

use crate::audit::AuditListFilter;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// Filtered audit list (newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<AuditListFilter>,
) -> AppResult<Json<Vec<ApplicationLog>>> {
    let entries = state.audit_service().list(&filter).await?;
    Ok(Json(entries))
}

/// Before/after review payload for one application log
pub async fn review(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApplicationReview>> {
    let review = state.audit_service().review(id).await?;
    Ok(Json(review))
}

/// Apply an approve/reject decision
pub async fn decide(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<AuditDecisionRequest>,
) -> AppResult<Json<ApplicationLog>> {
    let decided = state
        .audit_service()
        .decide(id, req.decision, &req.comment, user.id)
        .await?;
    Ok(Json(decided))
}
