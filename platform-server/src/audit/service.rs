//! 申请审核工作流
//!
//! 围绕纯核心 ([`super::history`], [`super::diff`]) 的服务层：
//! 提交申请、查询历史、生成审核视图、落地审核决定并物化诊所。
//! 服务自身不持久：所有状态经由注入的存储接缝读写。

use std::sync::Arc;

use chrono::Utc;

use shared::client::{ApplicationReview, ApplicationSubmitRequest};
use shared::models::application::{
    ApplicationAction, ApplicationLog, AuditStatus,
};
use shared::models::clinic::{Clinic, ClinicStatus};

use crate::store::{
    AccountStore, ApplicationLogFilter, ApplicationLogStore, ClinicStore,
};
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

use super::{diff, history};

/// 审核列表过滤条件 (透传给存储)
pub type AuditListFilter = ApplicationLogFilter;

/// 申请审核服务
#[derive(Clone)]
pub struct AuditService {
    logs: Arc<dyn ApplicationLogStore>,
    clinics: Arc<dyn ClinicStore>,
    accounts: Arc<dyn AccountStore>,
}

impl AuditService {
    pub fn new(
        logs: Arc<dyn ApplicationLogStore>,
        clinics: Arc<dyn ClinicStore>,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            logs,
            clinics,
            accounts,
        }
    }

    /// 诊所管理员提交申请 (submit / modify / delete)
    ///
    /// 不变式：同一诊所同时最多一条 pending 申请，在这里把关。
    /// submit 动作可以不带 clinic_id，由存储预留一个新 id；带 id 时
    /// 该诊所必须尚未物化 (被拒后重报的场景)。modify / delete 必须
    /// 针对已有诊所。
    /// 快照里的旧格式资质在此一次性迁移成显式槽位。
    pub async fn submit(
        &self,
        operator_id: i64,
        req: ApplicationSubmitRequest,
    ) -> AppResult<ApplicationLog> {
        let clinic_id = match (req.action, req.clinic_id) {
            (ApplicationAction::Submit, Some(id)) => {
                // 带 id 的入驻只允许针对预留但未物化的诊所 (如被拒后重报)；
                // 已物化的诊所不可被新的入驻申请顶替改挂管理员
                if self.clinics.find_by_id(id).await?.is_some() {
                    return Err(AppError::business_rule(format!(
                        "clinic {id} already exists; file a modify application instead"
                    )));
                }
                id
            }
            (ApplicationAction::Submit, None) => self.clinics.reserve_id().await?,
            (_, Some(id)) => {
                self.clinics
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Clinic {id} not found")))?;
                id
            }
            (_, None) => {
                return Err(AppError::validation(
                    "clinic_id is required for modify/delete applications",
                ));
            }
        };

        if let Some(pending) = self.logs.find_pending_by_clinic(clinic_id).await? {
            return Err(AppError::business_rule(format!(
                "clinic {clinic_id} already has a pending application (log {})",
                pending.log_id
            )));
        }

        let mut qualifications = req.qualifications;
        qualifications.migrate_legacy();

        let entry = ApplicationLog {
            log_id: 0, // 存储分配
            clinic_id,
            action: req.action,
            name: req.name,
            address: req.address,
            phone: req.phone,
            email: req.email,
            description: req.description,
            qualifications,
            audit_result: AuditStatus::Pending,
            operated_by: operator_id,
            operation_time: Utc::now(),
            comment: None,
        };

        let entry = self.logs.insert(entry).await?;
        tracing::info!(
            log_id = entry.log_id,
            clinic_id,
            action = ?entry.action,
            "application submitted"
        );
        Ok(entry)
    }

    /// 管理员审核列表 (倒序)
    pub async fn list(&self, filter: &AuditListFilter) -> AppResult<Vec<ApplicationLog>> {
        let mut entries = self.logs.list(filter).await?;
        history::sort_descending(&mut entries);
        Ok(entries)
    }

    /// 某诊所的申请历史 (倒序)
    pub async fn history(&self, clinic_id: i64) -> AppResult<Vec<ApplicationLog>> {
        let mut entries = self.logs.list_by_clinic(clinic_id).await?;
        history::sort_descending(&mut entries);
        Ok(entries)
    }

    /// 审核视图：目标记录 + 与上一条记录的逐字段对比
    pub async fn review(&self, log_id: i64) -> AppResult<ApplicationReview> {
        let target = self
            .logs
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application log {log_id} not found")))?;

        let siblings = self.logs.list_by_clinic(target.clinic_id).await?;
        let preceding = history::find_preceding(target.log_id, &siblings);

        Ok(diff::build_review(&target, preceding.as_ref()))
    }

    /// 落地审核决定
    ///
    /// 一次性迁移：终态记录不可再审。批准时把快照物化成诊所
    /// 当前状态 (submit 建所、modify 覆盖、delete 注销)。
    pub async fn decide(
        &self,
        log_id: i64,
        decision: AuditStatus,
        comment: &str,
        auditor_id: i64,
    ) -> AppResult<ApplicationLog> {
        validate_required_text(comment, "comment", MAX_NOTE_LEN)?;

        let entry = self
            .logs
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application log {log_id} not found")))?;

        // 迁移前记下提交人：apply_decision 会把 operated_by 改成审核人
        let submitter_id = entry.operated_by;
        let submitted_at = entry.operation_time;

        let decided = entry.apply_decision(decision, comment, auditor_id)?;
        let decided = self.logs.replace(decided).await?;

        if decided.audit_result == AuditStatus::Approved {
            self.materialize(&decided, submitter_id, submitted_at, auditor_id)
                .await?;
        }

        tracing::info!(
            log_id,
            decision = ?decided.audit_result,
            auditor_id,
            "application decided"
        );
        Ok(decided)
    }

    /// 诊所管理员撤销自己的 pending 申请
    ///
    /// 终态记录是历史，不可撤销；别人的记录不可撤销。
    pub async fn withdraw(&self, log_id: i64, operator_id: i64) -> AppResult<bool> {
        let entry = self
            .logs
            .find_by_id(log_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Application log {log_id} not found")))?;

        if entry.operated_by != operator_id {
            return Err(AppError::forbidden(
                "only the submitter may withdraw an application",
            ));
        }
        if entry.audit_result.is_terminal() {
            return Err(AppError::business_rule(
                "a decided application cannot be withdrawn",
            ));
        }

        let removed = self.logs.remove(log_id).await?;
        tracing::info!(log_id, operator_id, "application withdrawn");
        Ok(removed)
    }

    /// 把获批快照物化成诊所当前状态
    async fn materialize(
        &self,
        entry: &ApplicationLog,
        submitter_id: i64,
        submitted_at: chrono::DateTime<Utc>,
        auditor_id: i64,
    ) -> AppResult<()> {
        let now = Utc::now();
        match entry.action {
            ApplicationAction::Submit => {
                let clinic = Clinic {
                    clinic_id: entry.clinic_id,
                    name: entry.name.clone(),
                    address: entry.address.clone(),
                    phone: entry.phone.clone(),
                    email: entry.email.clone(),
                    description: entry.description.clone(),
                    qualifications: entry.qualifications.clone(),
                    status: ClinicStatus::Approved,
                    is_forbidden: false,
                    submitted_by: submitter_id,
                    submitted_at,
                    audited_by: Some(auditor_id),
                    audited_at: Some(now),
                    created_at: now,
                };
                self.clinics.upsert(clinic).await?;
                // 入驻获批：提交人成为该诊所的管理员
                self.accounts
                    .link_clinic(submitter_id, entry.clinic_id)
                    .await?;
            }
            ApplicationAction::Modify => {
                let mut clinic =
                    self.clinics.find_by_id(entry.clinic_id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Clinic {} not found", entry.clinic_id))
                    })?;
                clinic.name = entry.name.clone();
                clinic.address = entry.address.clone();
                clinic.phone = entry.phone.clone();
                clinic.email = entry.email.clone();
                clinic.description = entry.description.clone();
                clinic.qualifications = entry.qualifications.clone();
                clinic.audited_by = Some(auditor_id);
                clinic.audited_at = Some(now);
                self.clinics.upsert(clinic).await?;
            }
            ApplicationAction::Delete => {
                let mut clinic =
                    self.clinics.find_by_id(entry.clinic_id).await?.ok_or_else(|| {
                        AppError::not_found(format!("Clinic {} not found", entry.clinic_id))
                    })?;
                clinic.status = ClinicStatus::Deactivated;
                clinic.audited_by = Some(auditor_id);
                clinic.audited_at = Some(now);
                self.clinics.upsert(clinic).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AccountStore as _, MemoryStore, NewAccount};
    use shared::models::account::AccountStatus;
    use shared::models::application::QualificationSet;
    use shared::models::role::Role;

    async fn service_with_manager() -> (AuditService, i64) {
        let store = Arc::new(MemoryStore::new());
        let manager = store
            .create(NewAccount {
                username: "manager".into(),
                hash_pass: String::new(),
                email: "m@example.com".into(),
                phone: "13800000000".into(),
                role: Role::ClinicManager,
                status: AccountStatus::Active,
                clinic_id: None,
            })
            .await
            .unwrap();

        let service = AuditService::new(store.clone(), store.clone(), store);
        (service, manager.account_id)
    }

    fn submit_request(action: ApplicationAction, clinic_id: Option<i64>, name: &str) -> ApplicationSubmitRequest {
        ApplicationSubmitRequest {
            action,
            clinic_id,
            name: name.into(),
            address: "人民路 1 号".into(),
            phone: "0571-1234567".into(),
            email: None,
            description: "社区牙科诊所".into(),
            qualifications: QualificationSet::default(),
        }
    }

    #[tokio::test]
    async fn test_submit_allocates_clinic_id() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        assert!(entry.log_id > 0);
        assert!(entry.clinic_id > 0);
        assert_eq!(entry.audit_result, AuditStatus::Pending);
        assert_eq!(entry.operated_by, manager);
    }

    #[tokio::test]
    async fn test_submit_cannot_target_materialized_clinic() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(entry.log_id, AuditStatus::Approved, "资质齐全", 999)
            .await
            .unwrap();

        // 另一个管理员对已物化的诊所提交入驻申请：在提交入口就被拒，
        // 诊所和管理员关联都保持原样
        let rival = manager + 1;
        let err = service
            .submit(
                rival,
                submit_request(ApplicationAction::Submit, Some(entry.clinic_id), "李鬼口腔"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        let clinic = service
            .clinics
            .find_by_id(entry.clinic_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(clinic.name, "仁爱口腔");
        assert_eq!(clinic.submitted_by, manager);

        let account = service.accounts.find_by_id(manager).await.unwrap().unwrap();
        assert_eq!(account.clinic_id, Some(entry.clinic_id));
    }

    #[tokio::test]
    async fn test_resubmit_after_rejection_reuses_reserved_id() {
        let (service, manager) = service_with_manager().await;
        let first = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(first.log_id, AuditStatus::Rejected, "资料不全", 999)
            .await
            .unwrap();

        // 被拒的诊所从未物化，预留的 id 可以继续用于重报
        let second = service
            .submit(
                manager,
                submit_request(ApplicationAction::Submit, Some(first.clinic_id), "仁爱口腔"),
            )
            .await
            .unwrap();
        assert_eq!(second.clinic_id, first.clinic_id);
    }

    #[tokio::test]
    async fn test_second_pending_for_same_clinic_rejected() {
        let (service, manager) = service_with_manager().await;
        let first = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        let err = service
            .submit(
                manager,
                submit_request(ApplicationAction::Submit, Some(first.clinic_id), "仁爱口腔"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_approve_submit_materializes_clinic_and_links_manager() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        let decided = service
            .decide(entry.log_id, AuditStatus::Approved, "资质齐全", 999)
            .await
            .unwrap();
        assert_eq!(decided.audit_result, AuditStatus::Approved);
        assert_eq!(decided.operated_by, 999);

        let clinic = service
            .clinics
            .find_by_id(entry.clinic_id)
            .await
            .unwrap()
            .expect("clinic materialized");
        assert_eq!(clinic.name, "仁爱口腔");
        assert_eq!(clinic.status, ClinicStatus::Approved);
        assert_eq!(clinic.submitted_by, manager);
        assert_eq!(clinic.audited_by, Some(999));

        let account = service.accounts.find_by_id(manager).await.unwrap().unwrap();
        assert_eq!(account.clinic_id, Some(entry.clinic_id));
    }

    #[tokio::test]
    async fn test_approve_modify_replaces_clinic_fields() {
        let (service, manager) = service_with_manager().await;
        let submit = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(submit.log_id, AuditStatus::Approved, "ok", 999)
            .await
            .unwrap();

        let modify = service
            .submit(
                manager,
                submit_request(ApplicationAction::Modify, Some(submit.clinic_id), "仁爱口腔医院"),
            )
            .await
            .unwrap();
        service
            .decide(modify.log_id, AuditStatus::Approved, "ok", 999)
            .await
            .unwrap();

        let clinic = service
            .clinics
            .find_by_id(submit.clinic_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(clinic.name, "仁爱口腔医院");
    }

    #[tokio::test]
    async fn test_approve_delete_deactivates_clinic() {
        let (service, manager) = service_with_manager().await;
        let submit = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(submit.log_id, AuditStatus::Approved, "ok", 999)
            .await
            .unwrap();

        let delete = service
            .submit(
                manager,
                submit_request(ApplicationAction::Delete, Some(submit.clinic_id), "仁爱口腔"),
            )
            .await
            .unwrap();
        service
            .decide(delete.log_id, AuditStatus::Approved, "同意注销", 999)
            .await
            .unwrap();

        let clinic = service
            .clinics
            .find_by_id(submit.clinic_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(clinic.status, ClinicStatus::Deactivated);
    }

    #[tokio::test]
    async fn test_decide_is_one_shot() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(entry.log_id, AuditStatus::Rejected, "资料不全", 999)
            .await
            .unwrap();

        let err = service
            .decide(entry.log_id, AuditStatus::Approved, "再想想", 999)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_decide_requires_comment() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        let err = service
            .decide(entry.log_id, AuditStatus::Approved, "   ", 999)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_review_first_application_has_no_comparison() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        let review = service.review(entry.log_id).await.unwrap();
        assert!(!review.has_comparison);
        assert!(review.fields.iter().all(|f| !f.changed));
    }

    #[tokio::test]
    async fn test_review_modify_diffs_against_previous() {
        let (service, manager) = service_with_manager().await;
        let submit = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();
        service
            .decide(submit.log_id, AuditStatus::Approved, "ok", 999)
            .await
            .unwrap();

        let modify = service
            .submit(
                manager,
                submit_request(ApplicationAction::Modify, Some(submit.clinic_id), "仁爱口腔医院"),
            )
            .await
            .unwrap();

        let review = service.review(modify.log_id).await.unwrap();
        assert!(review.has_comparison);
        let name_diff = review
            .fields
            .iter()
            .find(|f| f.field == shared::models::application::SnapshotField::Name)
            .unwrap();
        assert!(name_diff.changed);
        assert_eq!(name_diff.previous.as_deref(), Some("仁爱口腔"));
    }

    #[tokio::test]
    async fn test_withdraw_pending_own_entry() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        assert!(service.withdraw(entry.log_id, manager).await.unwrap());
        assert!(service.history(entry.clinic_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_guards() {
        let (service, manager) = service_with_manager().await;
        let entry = service
            .submit(manager, submit_request(ApplicationAction::Submit, None, "仁爱口腔"))
            .await
            .unwrap();

        // 别人的记录不可撤销
        let err = service.withdraw(entry.log_id, manager + 1).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // 终态记录不可撤销
        service
            .decide(entry.log_id, AuditStatus::Rejected, "资料不全", 999)
            .await
            .unwrap();
        let err = service.withdraw(entry.log_id, manager).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }
}
