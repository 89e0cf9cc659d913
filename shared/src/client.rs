//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::account::AccountStatus;
use crate::models::application::{
    ApplicationAction, ApplicationLog, AuditStatus, DocumentKind, QualificationSet, SnapshotField,
};
use crate::models::menu::{Breadcrumb, MenuNode, RouteEntry};
use crate::models::role::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
}

/// Register request (注册表单与原后台一致：角色和初始状态由表单给出)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub phone: String,
    pub role: Role,
    pub status: AccountStatus,
}

// =============================================================================
// Application / Audit API DTOs
// =============================================================================

/// 提交诊所申请 (submit / modify / delete 共用一个载荷)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationSubmitRequest {
    pub action: ApplicationAction,
    /// submit 动作可缺省 (由服务端分配新诊所 id)
    pub clinic_id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub description: String,
    #[serde(default)]
    pub qualifications: QualificationSet,
}

/// 审核决定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditDecisionRequest {
    /// approved 或 rejected
    pub decision: AuditStatus,
    /// 审核意见，必填
    pub comment: String,
}

/// 单字段前后对比
///
/// 渲染契约：changed 为 true 时前后值并排展示；为 false 时只
/// 展示当前值 (previous 不下发)；没有上一条记录时整个对比不展示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: SnapshotField,
    pub label: String,
    pub current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub changed: bool,
}

/// 资质文档前后对比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDiff {
    pub kind: DocumentKind,
    pub label: String,
    pub current_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_url: Option<String>,
    pub changed: bool,
}

/// 审核视图：目标记录 + 与上一条记录的逐字段对比
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationReview {
    pub entry: ApplicationLog,
    /// 是否存在可对比的上一条记录
    pub has_comparison: bool,
    pub fields: Vec<FieldDiff>,
    pub documents: Vec<DocumentDiff>,
}

// =============================================================================
// Menu API DTOs
// =============================================================================

/// 当前角色的菜单与路由
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menus: Vec<MenuNode>,
    pub routes: Vec<RouteEntry>,
}

/// 导航定位：展开键 + 面包屑
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateResponse {
    pub open_keys: Vec<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
}
