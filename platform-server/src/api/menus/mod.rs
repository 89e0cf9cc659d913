//! Menu API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu router - 登录即可，按当前角色派生
pub fn router() -> Router<ServerState> {
    routes()
}

// 路径显式注册：axum 0.8 的 nest 不匹配带尾斜杠的根路径，集合根两种写法都要可达
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", get(handler::menu))
        .route("/api/menu/", get(handler::menu))
        .route("/api/menu/locate", get(handler::locate))
}
