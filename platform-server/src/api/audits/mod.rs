//! Audit API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Audit router - 仅平台管理员
pub fn router() -> Router<ServerState> {
    routes()
}

// 路径显式注册：axum 0.8 的 nest 不匹配带尾斜杠的根路径，集合根两种写法都要可达
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/audits", get(handler::list))
        .route("/api/audits/", get(handler::list))
        .route("/api/audits/{id}/review", get(handler::review))
        .route("/api/audits/{id}/decision", post(handler::decide))
        .layer(middleware::from_fn(require_admin))
}
