//! Application API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::client::ApplicationSubmitRequest;
use shared::models::application::{ApplicationAction, ApplicationLog};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Submit a clinic application (submit / modify / delete)
pub async fn submit(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(mut payload): Json<ApplicationSubmitRequest>,
) -> AppResult<Json<ApplicationLog>> {
    payload.validate()?;

    // modify/delete 默认针对自己的诊所；显式指定别的诊所则拒绝
    if payload.action != ApplicationAction::Submit {
        match (payload.clinic_id, user.clinic_id) {
            (None, Some(own)) => payload.clinic_id = Some(own),
            (Some(target), Some(own)) if target == own => {}
            (Some(_), _) => {
                return Err(AppError::forbidden(
                    "applications may only target your own clinic",
                ));
            }
            (None, None) => {
                return Err(AppError::business_rule(
                    "account is not linked to a clinic yet",
                ));
            }
        }
    }

    let entry = state.audit_service().submit(user.id, payload).await?;
    Ok(Json(entry))
}

/// The manager's own application history (newest first)
pub async fn mine(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ApplicationLog>>> {
    let clinic_id = user
        .clinic_id
        .ok_or_else(|| AppError::business_rule("account is not linked to a clinic yet"))?;
    let entries = state.audit_service().history(clinic_id).await?;
    Ok(Json(entries))
}

/// Withdraw a pending application
pub async fn withdraw(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = state.audit_service().withdraw(id, user.id).await?;
    Ok(Json(removed))
}
