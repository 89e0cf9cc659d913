//! Authentication Handlers
//!
//! Handles login, registration, and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use validator::Validate;

use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::NewAccount;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = state
        .stores
        .accounts
        .find_by_username(&req.username)
        .await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match account {
        Some(account) => {
            if !account.is_active() {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = account
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            account
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %account.username, role = %account.role, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.account_id,
            username: account.username,
            role: account.role,
            clinic_id: account.clinic_id,
        },
    }))
}

/// Register handler
///
/// 注册表单与原后台一致：角色和初始状态由表单给出。
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    req.validate()?;

    let hash_pass = shared::models::account::Account::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hash failed: {e}")))?;

    let account = state
        .stores
        .accounts
        .create(NewAccount {
            username: req.username,
            hash_pass,
            email: req.email,
            phone: req.phone,
            role: req.role,
            status: req.status,
            clinic_id: None,
        })
        .await?;

    tracing::info!(username = %account.username, role = %account.role, "Account registered");

    Ok(Json(UserInfo {
        id: account.account_id,
        username: account.username,
        role: account.role,
        clinic_id: account.clinic_id,
    }))
}

/// Current user lookup (fresh from the store, not just the token claims)
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = state
        .stores
        .accounts
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {} not found", user.id)))?;

    Ok(Json(UserInfo {
        id: account.account_id,
        username: account.username,
        role: account.role,
        clinic_id: account.clinic_id,
    }))
}
