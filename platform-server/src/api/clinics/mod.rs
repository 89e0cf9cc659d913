//! Clinic API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use shared::models::role::Role;

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

/// Clinic router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clinics", routes())
}

fn routes() -> Router<ServerState> {
    // 管理路由：仅平台管理员
    let admin_routes = Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/forbid", post(handler::forbid))
        .route("/{id}/unforbid", post(handler::unforbid))
        .layer(middleware::from_fn(require_admin));

    // 诊所管理员注销自己的诊所
    let manager_routes = Router::new()
        .route("/{id}/deactivate", post(handler::deactivate))
        .layer(middleware::from_fn(require_role(Role::ClinicManager)));

    admin_routes.merge(manager_routes)
}
