//! Clinic Model
//!
//! 诊所的权威当前状态。除管理员的直接维护操作外，
//! 诊所记录由最近一条获批的申请记录物化而来。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::application::QualificationSet;

/// 诊所状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicStatus {
    Pending,
    Approved,
    Rejected,
    Deactivated,
}

/// 诊所
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub clinic_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub description: String,
    #[serde(default)]
    pub qualifications: QualificationSet,
    pub status: ClinicStatus,
    /// 平台禁用开关 (管理员操作，独立于审核状态)
    pub is_forbidden: bool,
    pub submitted_by: i64,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audited_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 管理员直接更新诊所的载荷
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClinicUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}
