//! Doctor API Handlers
//!
//! 全部操作限定在当前诊所管理员自己的诊所范围内。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use shared::models::doctor::{Doctor, DoctorCreate, DoctorUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::DoctorFilter;
use crate::utils::{AppError, AppResult};

/// 当前管理员的诊所 id；未关联诊所时拒绝
fn own_clinic(user: &CurrentUser) -> AppResult<i64> {
    user.clinic_id
        .ok_or_else(|| AppError::business_rule("account is not linked to a clinic yet"))
}

/// List doctors of the manager's own clinic
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<DoctorFilter>,
) -> AppResult<Json<Vec<Doctor>>> {
    let clinic_id = own_clinic(&user)?;
    let doctors = state.stores.doctors.list(clinic_id, &filter).await?;
    Ok(Json(doctors))
}

/// Get doctor by id (must belong to the manager's clinic)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Doctor>> {
    let doctor = find_scoped(&state, &user, id).await?;
    Ok(Json(doctor))
}

/// Create a doctor in the manager's clinic
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DoctorCreate>,
) -> AppResult<Json<Doctor>> {
    payload.validate()?;
    let clinic_id = own_clinic(&user)?;

    let doctor = Doctor {
        doctor_id: 0, // 存储分配
        clinic_id,
        name: payload.name,
        avatar: payload.avatar,
        gender: payload.gender,
        phone: payload.phone,
        email: payload.email,
        specialty: payload.specialty,
        title: payload.title,
        experience_years: payload.experience_years,
        credentials: payload.credentials,
        description: payload.description,
    };

    let doctor = state.stores.doctors.create(doctor).await?;
    tracing::info!(doctor_id = doctor.doctor_id, clinic_id, "doctor created");
    Ok(Json(doctor))
}

/// Update a doctor
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<DoctorUpdate>,
) -> AppResult<Json<Doctor>> {
    payload.validate()?;
    let mut doctor = find_scoped(&state, &user, id).await?;

    if let Some(name) = payload.name {
        doctor.name = name;
    }
    if payload.avatar.is_some() {
        doctor.avatar = payload.avatar;
    }
    if let Some(gender) = payload.gender {
        doctor.gender = gender;
    }
    if let Some(phone) = payload.phone {
        doctor.phone = phone;
    }
    if let Some(email) = payload.email {
        doctor.email = email;
    }
    if let Some(specialty) = payload.specialty {
        doctor.specialty = specialty;
    }
    if let Some(title) = payload.title {
        doctor.title = title;
    }
    if let Some(experience_years) = payload.experience_years {
        doctor.experience_years = experience_years;
    }
    if let Some(credentials) = payload.credentials {
        doctor.credentials = credentials;
    }
    if let Some(description) = payload.description {
        doctor.description = description;
    }

    let doctor = state.stores.doctors.update(doctor).await?;
    Ok(Json(doctor))
}

/// Delete a doctor
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    // 先做归属检查再删除
    find_scoped(&state, &user, id).await?;
    let removed = state.stores.doctors.delete(id).await?;
    Ok(Json(removed))
}

async fn find_scoped(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Doctor> {
    let clinic_id = own_clinic(user)?;
    let doctor = state
        .stores
        .doctors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Doctor {id} not found")))?;
    if doctor.clinic_id != clinic_id {
        // 不暴露其他诊所的存在性
        return Err(AppError::not_found(format!("Doctor {id} not found")));
    }
    Ok(doctor)
}
