//! Doctor API Module

mod handler;

use axum::{Router, middleware, routing::get};

use shared::models::role::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Doctor router - 诊所管理员维护自己诊所的医生
pub fn router() -> Router<ServerState> {
    routes()
}

// 路径显式注册：axum 0.8 的 nest 不匹配带尾斜杠的根路径，集合根两种写法都要可达
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/doctors", get(handler::list).post(handler::create))
        .route("/api/doctors/", get(handler::list).post(handler::create))
        .route(
            "/api/doctors/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(Role::ClinicManager)))
}
