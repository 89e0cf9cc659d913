//! 牙科诊所平台共享类型
//!
//! 领域模型和 API DTO，服务端与客户端共用。
//! 本 crate 不做任何 I/O，只定义数据结构和纯辅助函数。

pub mod client;
pub mod models;

// Re-export 常用类型
pub use client::{
    ApplicationReview, ApplicationSubmitRequest, AuditDecisionRequest, DocumentDiff, FieldDiff,
    LocateResponse, LoginRequest, LoginResponse, MenuResponse, RegisterRequest, UserInfo,
};
pub use models::account::{Account, AccountStatus};
pub use models::application::{
    ApplicationAction, ApplicationLog, AuditStatus, DecisionError, DocumentKind, LicenseRecord,
    QualificationSet, SnapshotField,
};
pub use models::clinic::{Clinic, ClinicStatus, ClinicUpdate};
pub use models::doctor::{Doctor, DoctorCreate, DoctorUpdate};
pub use models::menu::{Breadcrumb, MenuNode, RouteEntry};
pub use models::role::Role;
