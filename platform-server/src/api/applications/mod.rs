//! Application API Module

mod handler;

use axum::{Router, middleware, routing::delete, routing::get, routing::post};

use shared::models::role::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Application router - 诊所管理员提交/查看/撤销自己的申请
pub fn router() -> Router<ServerState> {
    routes()
}

// 路径显式注册：axum 0.8 的 nest 不匹配带尾斜杠的根路径，集合根两种写法都要可达
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/applications", post(handler::submit))
        .route("/api/applications/", post(handler::submit))
        .route("/api/applications/mine", get(handler::mine))
        .route("/api/applications/{id}", delete(handler::withdraw))
        .layer(middleware::from_fn(require_role(Role::ClinicManager)))
}
