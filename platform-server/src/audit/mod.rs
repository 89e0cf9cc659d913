//! 申请审核核心
//!
//! - [`history`] - 申请记录排序与前序记录查找 (纯函数)
//! - [`diff`] - 字段/文档前后快照差异 (纯函数)
//! - [`service::AuditService`] - 围绕纯核心的工作流 (提交/列表/审核/撤销)

pub mod diff;
pub mod history;
pub mod service;

pub use diff::{build_review, diff_document, diff_field};
pub use history::find_preceding;
pub use service::{AuditListFilter, AuditService};
