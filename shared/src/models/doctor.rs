//! Doctor Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 执业资历
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorCredentials {
    /// 学历
    pub degree: String,
    /// 执业证号
    pub license_number: String,
}

/// 医生
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: i64,
    pub clinic_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub gender: String,
    pub phone: String,
    pub email: String,
    /// 专业方向
    pub specialty: String,
    /// 职称
    pub title: String,
    /// 从业年限
    pub experience_years: u16,
    #[serde(default)]
    pub credentials: DoctorCredentials,
    pub description: String,
}

/// 新增医生载荷 (clinic_id 来自当前登录的诊所管理员)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DoctorCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub avatar: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub gender: String,
    #[validate(length(min = 1, max = 100))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub specialty: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub experience_years: u16,
    #[serde(default)]
    pub credentials: DoctorCredentials,
    #[validate(length(max = 500))]
    pub description: String,
}

/// 更新医生载荷
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DoctorUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2048))]
    pub avatar: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub specialty: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub experience_years: Option<u16>,
    pub credentials: Option<DoctorCredentials>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}
