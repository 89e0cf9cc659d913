//! 前后快照差异计算
//!
//! 审核弹窗展示"本次申请相对上一次改了什么"。比较是严格的值
//! 比较，不做任何归一化：空白或大小写差异都算变更。
//!
//! 渲染契约 (由外部 UI 消费)：changed 为 true 时前后值并排下发；
//! 为 false 时只下发当前值；完全没有上一条记录时不下发对比。

use shared::client::{ApplicationReview, DocumentDiff, FieldDiff};
use shared::models::application::{ApplicationLog, DocumentKind, SnapshotField};

/// 单个文本字段的前后对比
///
/// `changed` 为 true 当且仅当：存在上一条记录、字段在两条记录上
/// 都有值、且两值严格不等。没有上一条记录时恒为 false —
/// 没有可比对象，字段按"仅当前值"展示，不按差异展示。
pub fn diff_field(
    current: &ApplicationLog,
    previous: Option<&ApplicationLog>,
    field: SnapshotField,
) -> FieldDiff {
    let current_value = current.field_value(field).map(str::to_string);
    let previous_value = previous.and_then(|p| p.field_value(field)).map(str::to_string);

    let changed = match (&current_value, &previous_value) {
        (Some(cur), Some(prev)) => cur != prev,
        _ => false,
    };

    FieldDiff {
        field,
        label: field.label().to_string(),
        current: current_value,
        // 渲染契约：未变更时不下发旧值
        previous: if changed { previous_value } else { None },
        changed,
    }
}

/// 单个资质文档槽位的前后对比
///
/// 槽位是显式映射查找；旧格式的自由文本匹配已在快照进入系统时
/// 迁移完毕，这里不再做任何启发式查找。槽位两边都空不算变更。
pub fn diff_document(
    current: &ApplicationLog,
    previous: Option<&ApplicationLog>,
    kind: DocumentKind,
) -> DocumentDiff {
    let current_url = current
        .qualifications
        .document_url(kind)
        .map(str::to_string);
    let previous_url = previous
        .and_then(|p| p.qualifications.document_url(kind))
        .map(str::to_string);

    let changed = match (&current_url, &previous_url) {
        (Some(cur), Some(prev)) => cur != prev,
        _ => false,
    };

    DocumentDiff {
        kind,
        label: kind.label().to_string(),
        current_url,
        previous_url: if changed { previous_url } else { None },
        changed,
    }
}

/// 组装完整的审核视图：全部字段 + 全部文档槽位
pub fn build_review(target: &ApplicationLog, preceding: Option<&ApplicationLog>) -> ApplicationReview {
    let fields = SnapshotField::ALL
        .iter()
        .map(|&f| diff_field(target, preceding, f))
        .collect();
    let documents = DocumentKind::ALL
        .iter()
        .map(|&k| diff_document(target, preceding, k))
        .collect();

    ApplicationReview {
        entry: target.clone(),
        has_comparison: preceding.is_some(),
        fields,
        documents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::application::{ApplicationAction, AuditStatus, QualificationSet};
    use std::collections::BTreeMap;

    fn snapshot(name: &str, email: Option<&str>) -> ApplicationLog {
        ApplicationLog {
            log_id: 1,
            clinic_id: 1,
            action: ApplicationAction::Modify,
            name: name.into(),
            address: "人民路 1 号".into(),
            phone: "0571-1234567".into(),
            email: email.map(str::to_string),
            description: "社区牙科诊所".into(),
            qualifications: QualificationSet::default(),
            audit_result: AuditStatus::Pending,
            operated_by: 1,
            operation_time: Utc::now(),
            comment: None,
        }
    }

    #[test]
    fn test_changed_field_exposes_both_values() {
        let current = snapshot("仁爱口腔", None);
        let previous = snapshot("仁爱牙科", None);

        let diff = diff_field(&current, Some(&previous), SnapshotField::Name);
        assert!(diff.changed);
        assert_eq!(diff.current.as_deref(), Some("仁爱口腔"));
        assert_eq!(diff.previous.as_deref(), Some("仁爱牙科"));
    }

    #[test]
    fn test_unchanged_field_exposes_current_only() {
        let current = snapshot("仁爱口腔", None);
        let previous = snapshot("仁爱口腔", None);

        let diff = diff_field(&current, Some(&previous), SnapshotField::Name);
        assert!(!diff.changed);
        assert_eq!(diff.current.as_deref(), Some("仁爱口腔"));
        assert!(diff.previous.is_none());
    }

    #[test]
    fn test_no_normalization_whitespace_counts() {
        let current = snapshot("仁爱口腔 ", None);
        let previous = snapshot("仁爱口腔", None);
        assert!(diff_field(&current, Some(&previous), SnapshotField::Name).changed);
    }

    #[test]
    fn test_no_previous_implies_no_change() {
        let current = snapshot("仁爱口腔", Some("a@b.com"));
        for field in SnapshotField::ALL {
            let diff = diff_field(&current, None, field);
            assert!(!diff.changed, "{field:?} flagged changed without previous");
        }
    }

    #[test]
    fn test_field_absent_on_one_side_is_not_a_change() {
        // email 只在当前快照有值：没有比对基准，不算变更
        let current = snapshot("仁爱口腔", Some("a@b.com"));
        let previous = snapshot("仁爱口腔", None);

        let diff = diff_field(&current, Some(&previous), SnapshotField::Email);
        assert!(!diff.changed);
        assert_eq!(diff.current.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_diff_symmetry() {
        // changed 对 A/B 交换是对称的 (相等关系对称)
        let a = snapshot("仁爱口腔", Some("a@b.com"));
        let b = snapshot("仁爱牙科", Some("b@b.com"));

        for field in SnapshotField::ALL {
            let ab = diff_field(&a, Some(&b), field).changed;
            let ba = diff_field(&b, Some(&a), field).changed;
            assert_eq!(ab, ba, "{field:?} not symmetric");
        }
    }

    fn with_document(mut log: ApplicationLog, kind: DocumentKind, url: &str) -> ApplicationLog {
        log.qualifications.documents =
            BTreeMap::from([(kind, url.to_string())]);
        log
    }

    #[test]
    fn test_document_diff_changed() {
        let current = with_document(
            snapshot("仁爱口腔", None),
            DocumentKind::BusinessLicense,
            "/files/new.jpg",
        );
        let previous = with_document(
            snapshot("仁爱口腔", None),
            DocumentKind::BusinessLicense,
            "/files/old.jpg",
        );

        let diff = diff_document(&current, Some(&previous), DocumentKind::BusinessLicense);
        assert!(diff.changed);
        assert_eq!(diff.current_url.as_deref(), Some("/files/new.jpg"));
        assert_eq!(diff.previous_url.as_deref(), Some("/files/old.jpg"));
    }

    #[test]
    fn test_document_absent_both_sides_is_no_document() {
        let current = snapshot("仁爱口腔", None);
        let previous = snapshot("仁爱口腔", None);

        let diff = diff_document(&current, Some(&previous), DocumentKind::TaxCertificate);
        assert!(!diff.changed);
        assert!(diff.current_url.is_none());
        assert!(diff.previous_url.is_none());
    }

    #[test]
    fn test_review_without_preceding_has_no_comparison() {
        let review = build_review(&snapshot("仁爱口腔", None), None);
        assert!(!review.has_comparison);
        assert!(review.fields.iter().all(|f| !f.changed));
        assert!(review.documents.iter().all(|d| !d.changed));
        assert_eq!(review.fields.len(), SnapshotField::ALL.len());
        assert_eq!(review.documents.len(), DocumentKind::ALL.len());
    }
}
