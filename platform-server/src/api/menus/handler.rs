//! Menu API Handlers
//!
//! 登录时取一次菜单，之后每次导航调 locate 同步展开键和面包屑。
//! 角色永远来自已验证的 JWT，不接受请求参数指定。

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::client::{LocateResponse, MenuResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// 当前角色的菜单树 + 扁平路由表
pub async fn menu(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<MenuResponse>> {
    let menus = state.menu.menu_for(user.role);
    let routes = state.menu.routes_for(user.role);
    Ok(Json(MenuResponse { menus, routes }))
}

#[derive(Debug, Deserialize)]
pub struct LocateQuery {
    /// 当前浏览器路径，如 /admin/clinic/list
    pub path: String,
}

/// 当前路径的展开键与面包屑
pub async fn locate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<LocateQuery>,
) -> AppResult<Json<LocateResponse>> {
    let open_keys = state.menu.open_keys_for(user.role, &query.path);
    let breadcrumbs = state.menu.breadcrumbs_for(user.role, &query.path);
    Ok(Json(LocateResponse {
        open_keys,
        breadcrumbs,
    }))
}
