//! 申请记录的时间序
//!
//! 同一诊所的记录按 operation_time 构成全序。展示和查找都用
//! 倒序 (最新在前)；时间戳相同时按 log_id 倒序决胜，log_id 是
//! 分配序，所以相同时刻的记录以后提交的为"更新"。

use std::cmp::Ordering;

use shared::models::application::ApplicationLog;

/// 倒序比较：operation_time 降序，log_id 降序决胜
pub fn descending(a: &ApplicationLog, b: &ApplicationLog) -> Ordering {
    b.operation_time
        .cmp(&a.operation_time)
        .then(b.log_id.cmp(&a.log_id))
}

/// 把一组记录按倒序排好 (最新在前)
pub fn sort_descending(entries: &mut [ApplicationLog]) {
    entries.sort_by(descending);
}

/// 查找目标记录的紧邻前一条记录 (按时间)
///
/// 倒序排序后定位目标，取它的下一条，即时间上更早的那条。
/// 目标是最老的一条、唯一的一条、或根本不在列表里时返回 None —
/// 这不是错误，只表示没有可对比的历史。
pub fn find_preceding(target_log_id: i64, entries: &[ApplicationLog]) -> Option<ApplicationLog> {
    let mut sorted: Vec<&ApplicationLog> = entries.iter().collect();
    sorted.sort_by(|a, b| descending(a, b));

    let pos = sorted.iter().position(|e| e.log_id == target_log_id)?;
    sorted.get(pos + 1).map(|e| (*e).clone())
}
