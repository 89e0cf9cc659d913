//! 存储接缝
//!
//! 申请日志和平台资源的存储是外部协作方：本 crate 只约定读写的
//! 形状，不约定传输。接口是 async trait (网络形状)，默认实现是
//! 进程内的 [`memory::MemoryStore`]。

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use shared::models::account::{Account, AccountStatus};
use shared::models::application::{ApplicationLog, AuditStatus};
use shared::models::clinic::{Clinic, ClinicStatus};
use shared::models::doctor::Doctor;
use shared::models::role::Role;

pub use memory::MemoryStore;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// 新账号 (id 由存储分配，密码已经哈希)
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub hash_pass: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: AccountStatus,
    pub clinic_id: Option<i64>,
}

/// 诊所列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClinicFilter {
    /// 名称包含
    pub name: Option<String>,
    pub status: Option<ClinicStatus>,
}

/// 医生列表过滤条件 (始终在单个诊所范围内)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorFilter {
    /// 姓名包含
    pub name: Option<String>,
    /// 专业包含
    pub specialty: Option<String>,
}

/// 申请记录列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationLogFilter {
    /// 诊所名称包含
    pub name: Option<String>,
    pub audit_result: Option<AuditStatus>,
    /// operation_time 起 (含)
    pub from: Option<DateTime<Utc>>,
    /// operation_time 止 (含)
    pub to: Option<DateTime<Utc>>,
}

/// 账号存储
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, account_id: i64) -> StoreResult<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>>;
    /// 用户名重复返回 [`StoreError::Duplicate`]
    async fn create(&self, account: NewAccount) -> StoreResult<Account>;
    /// 建立账号与诊所的关联 (申请获批时)
    async fn link_clinic(&self, account_id: i64, clinic_id: i64) -> StoreResult<Account>;
}

/// 诊所存储
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn list(&self, filter: &ClinicFilter) -> StoreResult<Vec<Clinic>>;
    async fn find_by_id(&self, clinic_id: i64) -> StoreResult<Option<Clinic>>;
    /// 为尚未物化的新诊所预留 id (submit 申请提交时)
    async fn reserve_id(&self) -> StoreResult<i64>;
    /// 写入物化的诊所记录 (id 已由 [`reserve_id`] 分配)
    ///
    /// [`reserve_id`]: ClinicStore::reserve_id
    async fn upsert(&self, clinic: Clinic) -> StoreResult<Clinic>;
    async fn delete(&self, clinic_id: i64) -> StoreResult<bool>;
}

/// 医生存储
#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn list(&self, clinic_id: i64, filter: &DoctorFilter) -> StoreResult<Vec<Doctor>>;
    async fn find_by_id(&self, doctor_id: i64) -> StoreResult<Option<Doctor>>;
    /// id 由存储分配
    async fn create(&self, doctor: Doctor) -> StoreResult<Doctor>;
    async fn update(&self, doctor: Doctor) -> StoreResult<Doctor>;
    async fn delete(&self, doctor_id: i64) -> StoreResult<bool>;
}

/// 申请日志存储
#[async_trait]
pub trait ApplicationLogStore: Send + Sync {
    async fn list(&self, filter: &ApplicationLogFilter) -> StoreResult<Vec<ApplicationLog>>;
    async fn list_by_clinic(&self, clinic_id: i64) -> StoreResult<Vec<ApplicationLog>>;
    async fn find_by_id(&self, log_id: i64) -> StoreResult<Option<ApplicationLog>>;
    async fn find_pending_by_clinic(&self, clinic_id: i64)
    -> StoreResult<Option<ApplicationLog>>;
    /// log_id 由存储分配
    async fn insert(&self, entry: ApplicationLog) -> StoreResult<ApplicationLog>;
    /// 整条替换 (审核决定落库)
    async fn replace(&self, entry: ApplicationLog) -> StoreResult<ApplicationLog>;
    /// 物理删除 (仅撤销 pending 记录时)
    async fn remove(&self, log_id: i64) -> StoreResult<bool>;
}
