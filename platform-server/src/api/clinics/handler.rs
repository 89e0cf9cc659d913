//! Clinic API Handlers
//!
//! 诊所记录主要由审核工作流物化；这里是管理员的直接维护入口
//! (查询、订正、禁用开关) 和诊所管理员的注销入口。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use shared::models::clinic::{Clinic, ClinicStatus, ClinicUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::ClinicFilter;
use crate::utils::{AppError, AppResult};

/// List clinics with optional name/status filters
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ClinicFilter>,
) -> AppResult<Json<Vec<Clinic>>> {
    let clinics = state.stores.clinics.list(&filter).await?;
    Ok(Json(clinics))
}

/// Get clinic by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Clinic>> {
    let clinic = find_clinic(&state, id).await?;
    Ok(Json(clinic))
}

/// Direct admin update of clinic fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClinicUpdate>,
) -> AppResult<Json<Clinic>> {
    payload.validate()?;

    let mut clinic = find_clinic(&state, id).await?;
    if let Some(name) = payload.name {
        clinic.name = name;
    }
    if let Some(address) = payload.address {
        clinic.address = address;
    }
    if let Some(phone) = payload.phone {
        clinic.phone = phone;
    }
    if payload.email.is_some() {
        clinic.email = payload.email;
    }
    if let Some(description) = payload.description {
        clinic.description = description;
    }

    let clinic = state.stores.clinics.upsert(clinic).await?;
    Ok(Json(clinic))
}

/// Delete a clinic record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = state.stores.clinics.delete(id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Clinic {id} not found")));
    }
    Ok(Json(true))
}

/// Platform-level forbid toggle (独立于审核状态)
pub async fn forbid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Clinic>> {
    set_forbidden(&state, id, true).await
}

pub async fn unforbid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Clinic>> {
    set_forbidden(&state, id, false).await
}

/// Clinic manager deactivates their own clinic
pub async fn deactivate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Clinic>> {
    if user.clinic_id != Some(id) {
        return Err(AppError::forbidden(
            "only the clinic's own manager may deactivate it",
        ));
    }

    let mut clinic = find_clinic(&state, id).await?;
    clinic.status = ClinicStatus::Deactivated;
    let clinic = state.stores.clinics.upsert(clinic).await?;

    tracing::info!(clinic_id = id, manager_id = user.id, "clinic deactivated");
    Ok(Json(clinic))
}

async fn find_clinic(state: &ServerState, id: i64) -> AppResult<Clinic> {
    state
        .stores
        .clinics
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Clinic {id} not found")))
}

async fn set_forbidden(state: &ServerState, id: i64, forbidden: bool) -> AppResult<Json<Clinic>> {
    let mut clinic = find_clinic(state, id).await?;
    clinic.is_forbidden = forbidden;
    let clinic = state.stores.clinics.upsert(clinic).await?;
    Ok(Json(clinic))
}
