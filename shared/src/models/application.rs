//! Application Log Model
//!
//! 诊所信息申请的历史记录。每条记录是提交时刻的诊所字段快照，
//! 等待或已经收到审核决定。记录一旦落库不可再改动字段内容，
//! 唯一的一次状态迁移是 pending → approved | rejected。

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 申请动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationAction {
    /// 新诊所入驻
    Submit,
    /// 修改诊所信息
    Modify,
    /// 注销诊所
    Delete,
}

/// 审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Pending,
    Approved,
    Rejected,
}

impl AuditStatus {
    /// 是否终态 (approved / rejected)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuditStatus::Pending)
    }
}

/// 资质文档槽位
///
/// 显式枚举代替自由文本匹配：每个槽位对应一类固定的资质证照。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    MedicalInstitutionLicense,
    BusinessLicense,
    TaxCertificate,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::MedicalInstitutionLicense,
        DocumentKind::BusinessLicense,
        DocumentKind::TaxCertificate,
    ];

    /// 中文名称 (前端展示用)
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::MedicalInstitutionLicense => "医疗机构执业许可证",
            DocumentKind::BusinessLicense => "营业执照",
            DocumentKind::TaxCertificate => "税务登记证",
        }
    }

    /// 历史数据中的自由文本标记
    ///
    /// 旧快照把文档藏在 licenses 列表里，靠 license_number / issued_by
    /// 包含这些字符串来识别。营业执照在历史数据中带拼写错误的键
    /// `businesLicense`，两种写法都要认。
    fn legacy_tokens(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::MedicalInstitutionLicense => &["medicalInstitutionLicense"],
            DocumentKind::BusinessLicense => &["businesLicense", "businessLicense"],
            DocumentKind::TaxCertificate => &["taxCertificate"],
        }
    }
}

/// 自由格式执业证照记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub license_number: String,
    pub issued_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub certificate_url: String,
}

/// 诊所资质快照
///
/// `documents` 是槽位到存储地址的显式映射；`licenses` 保留自由格式
/// 证照列表。旧数据只有 licenses，进入系统时用 [`migrate_legacy`]
/// 一次性补齐槽位，之后读取只查映射，不再做文本匹配。
///
/// [`migrate_legacy`]: QualificationSet::migrate_legacy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualificationSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub documents: BTreeMap<DocumentKind, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<LicenseRecord>,
}

impl QualificationSet {
    /// 槽位对应的文档地址
    pub fn document_url(&self, kind: DocumentKind) -> Option<&str> {
        self.documents.get(&kind).map(String::as_str)
    }

    /// 从旧格式 licenses 列表回填空槽位
    ///
    /// 对每个空槽位，按列表顺序找第一条 license_number 或 issued_by
    /// 包含旧标记的记录，取它的 certificate_url。找不到就保持空，
    /// 不算错误。只在快照进入系统时调用一次。
    pub fn migrate_legacy(&mut self) {
        for kind in DocumentKind::ALL {
            if self.documents.contains_key(&kind) {
                continue;
            }
            let matched = self.licenses.iter().find(|lic| {
                kind.legacy_tokens()
                    .iter()
                    .any(|t| lic.license_number.contains(t) || lic.issued_by.contains(t))
            });
            if let Some(lic) = matched {
                self.documents.insert(kind, lic.certificate_url.clone());
            }
        }
    }
}

/// 快照中参与差异比对的文本字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    Name,
    Address,
    Phone,
    Email,
    Description,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 5] = [
        SnapshotField::Name,
        SnapshotField::Address,
        SnapshotField::Phone,
        SnapshotField::Email,
        SnapshotField::Description,
    ];

    /// 中文名称 (前端展示用)
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotField::Name => "诊所名称",
            SnapshotField::Address => "地址",
            SnapshotField::Phone => "联系电话",
            SnapshotField::Email => "邮箱",
            SnapshotField::Description => "诊所简介",
        }
    }
}

/// 审核决定应用失败
#[derive(Debug, Error, PartialEq)]
pub enum DecisionError {
    #[error("application already decided: {0:?}")]
    AlreadyDecided(AuditStatus),

    #[error("audit comment must not be empty")]
    EmptyComment,

    #[error("decision must be approved or rejected")]
    InvalidDecision,
}

/// 诊所信息申请记录
///
/// 同一 clinic_id 的记录按 operation_time 构成全序；
/// 同一诊所同时最多只有一条 pending (由提交入口保证)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub log_id: i64,
    pub clinic_id: i64,
    pub action: ApplicationAction,

    // ---- 诊所字段快照 ----
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub description: String,
    #[serde(default)]
    pub qualifications: QualificationSet,

    // ---- 审核状态 ----
    pub audit_result: AuditStatus,
    /// 创建时为提交人，审核后变为审核人
    pub operated_by: i64,
    pub operation_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ApplicationLog {
    /// 读取参与比对的文本字段
    pub fn field_value(&self, field: SnapshotField) -> Option<&str> {
        match field {
            SnapshotField::Name => Some(self.name.as_str()),
            SnapshotField::Address => Some(self.address.as_str()),
            SnapshotField::Phone => Some(self.phone.as_str()),
            SnapshotField::Email => self.email.as_deref(),
            SnapshotField::Description => Some(self.description.as_str()),
        }
    }

    /// 应用审核决定 (纯状态迁移，不做持久化)
    ///
    /// 只允许 pending → approved | rejected，且备注必填。
    /// 终态记录不可再次审核。operation_time 保持提交时刻不变，
    /// 审核时刻由外部存储自行记账。
    pub fn apply_decision(
        &self,
        decision: AuditStatus,
        comment: &str,
        auditor_id: i64,
    ) -> Result<ApplicationLog, DecisionError> {
        if !decision.is_terminal() {
            return Err(DecisionError::InvalidDecision);
        }
        if self.audit_result.is_terminal() {
            return Err(DecisionError::AlreadyDecided(self.audit_result));
        }
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DecisionError::EmptyComment);
        }

        let mut decided = self.clone();
        decided.audit_result = decision;
        decided.comment = Some(comment.to_string());
        decided.operated_by = auditor_id;
        Ok(decided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(audit_result: AuditStatus) -> ApplicationLog {
        ApplicationLog {
            log_id: 1,
            clinic_id: 10,
            action: ApplicationAction::Modify,
            name: "仁爱口腔".into(),
            address: "人民路 1 号".into(),
            phone: "0571-1234567".into(),
            email: Some("clinic@example.com".into()),
            description: "社区牙科诊所".into(),
            qualifications: QualificationSet::default(),
            audit_result,
            operated_by: 100,
            operation_time: Utc::now(),
            comment: None,
        }
    }

    #[test]
    fn test_decision_on_pending_entry() {
        let pending = entry(AuditStatus::Pending);
        let decided = pending
            .apply_decision(AuditStatus::Approved, "  资质齐全  ", 7)
            .unwrap();

        assert_eq!(decided.audit_result, AuditStatus::Approved);
        assert_eq!(decided.comment.as_deref(), Some("资质齐全"));
        assert_eq!(decided.operated_by, 7);
        // 提交时刻不被审核改写
        assert_eq!(decided.operation_time, pending.operation_time);
    }

    #[test]
    fn test_decision_is_one_shot() {
        let approved = entry(AuditStatus::Approved);
        let err = approved
            .apply_decision(AuditStatus::Rejected, "changed my mind", 7)
            .unwrap_err();
        assert_eq!(err, DecisionError::AlreadyDecided(AuditStatus::Approved));

        let rejected = entry(AuditStatus::Rejected);
        assert!(
            rejected
                .apply_decision(AuditStatus::Approved, "retry", 7)
                .is_err()
        );
    }

    #[test]
    fn test_decision_requires_comment() {
        let pending = entry(AuditStatus::Pending);
        assert_eq!(
            pending
                .apply_decision(AuditStatus::Rejected, "   ", 7)
                .unwrap_err(),
            DecisionError::EmptyComment
        );
    }

    #[test]
    fn test_decision_must_be_terminal() {
        let pending = entry(AuditStatus::Pending);
        assert_eq!(
            pending
                .apply_decision(AuditStatus::Pending, "noop", 7)
                .unwrap_err(),
            DecisionError::InvalidDecision
        );
    }

    fn license(number: &str, issued_by: &str, url: &str) -> LicenseRecord {
        LicenseRecord {
            license_number: number.into(),
            issued_by: issued_by.into(),
            issue_date: None,
            expiry_date: None,
            certificate_url: url.into(),
        }
    }

    #[test]
    fn test_migrate_legacy_fills_empty_slots() {
        let mut quals = QualificationSet {
            documents: BTreeMap::new(),
            licenses: vec![
                license("medicalInstitutionLicense-2023", "卫健委", "/files/mil.jpg"),
                license("x-001", "businesLicense 市监局", "/files/biz.jpg"),
            ],
        };
        quals.migrate_legacy();

        assert_eq!(
            quals.document_url(DocumentKind::MedicalInstitutionLicense),
            Some("/files/mil.jpg")
        );
        // 拼错的历史键也要被认出
        assert_eq!(
            quals.document_url(DocumentKind::BusinessLicense),
            Some("/files/biz.jpg")
        );
        // 没有匹配的槽位保持空，不是错误
        assert_eq!(quals.document_url(DocumentKind::TaxCertificate), None);
    }

    #[test]
    fn test_migrate_legacy_keeps_existing_slots() {
        let mut quals = QualificationSet {
            documents: BTreeMap::from([(DocumentKind::TaxCertificate, "/files/tax.jpg".into())]),
            licenses: vec![license("taxCertificate-old", "税务局", "/files/old-tax.jpg")],
        };
        quals.migrate_legacy();

        // 已填槽位不被旧数据覆盖
        assert_eq!(
            quals.document_url(DocumentKind::TaxCertificate),
            Some("/files/tax.jpg")
        );
    }

    #[test]
    fn test_migrate_legacy_first_match_wins() {
        let mut quals = QualificationSet {
            documents: BTreeMap::new(),
            licenses: vec![
                license("taxCertificate-a", "税务局", "/files/first.jpg"),
                license("taxCertificate-b", "税务局", "/files/second.jpg"),
            ],
        };
        quals.migrate_legacy();

        assert_eq!(
            quals.document_url(DocumentKind::TaxCertificate),
            Some("/files/first.jpg")
        );
    }
}
