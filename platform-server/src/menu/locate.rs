//! 导航定位：展开键与面包屑
//!
//! 页面加载/刷新时根据当前路径恢复菜单选中状态。
//! 匹配用路径分段前缀比较，不用子串包含，
//! 避免一个 key 恰好是另一个无关 key 的文本子串时误判。

use shared::models::menu::{Breadcrumb, MenuNode};

use super::tree::flatten_routes;

/// 面包屑根条目
const HOME_KEY: &str = "/admin/dashboard";
const HOME_LABEL: &str = "首页";

/// key 是否是 path 的分段前缀
///
/// "/admin/clinic" 是 "/admin/clinic/list" 的前缀；
/// "/admin/cli" 不是。
fn is_segment_prefix(key: &str, path: &str) -> bool {
    let key_segs: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    !key_segs.is_empty()
        && key_segs.len() <= path_segs.len()
        && key_segs.iter().zip(path_segs.iter()).all(|(a, b)| a == b)
}

/// 当前路径的所有结构性祖先节点的 key (任意深度，前序)
///
/// 用于页面刷新后预展开/选中菜单。
pub fn open_keys(current_path: &str, filtered: &[MenuNode]) -> Vec<String> {
    let mut keys = Vec::new();
    collect_open_keys(current_path, filtered, &mut keys);
    keys
}

fn collect_open_keys(path: &str, nodes: &[MenuNode], out: &mut Vec<String>) {
    for node in nodes {
        if is_segment_prefix(&node.key, path) {
            out.push(node.key.clone());
        }
        if let Some(children) = &node.children {
            collect_open_keys(path, children, out);
        }
    }
}

/// 当前路径的面包屑
///
/// 扁平化后保留分段前缀祖先，并在最前面加上合成的"首页"条目。
/// 无任何匹配时返回空列表 (不单独下发首页)，由调用方决定不展示。
pub fn breadcrumb_path(current_path: &str, filtered: &[MenuNode]) -> Vec<Breadcrumb> {
    let matched: Vec<Breadcrumb> = flatten_routes(filtered)
        .into_iter()
        .filter(|entry| is_segment_prefix(&entry.key, current_path))
        .map(|entry| Breadcrumb {
            key: entry.key,
            label: entry.label,
        })
        .collect();

    if matched.is_empty() {
        return Vec::new();
    }

    let mut crumbs = Vec::with_capacity(matched.len() + 1);
    if matched.first().map(|c| c.key.as_str()) != Some(HOME_KEY) {
        crumbs.push(Breadcrumb {
            key: HOME_KEY.to_string(),
            label: HOME_LABEL.to_string(),
        });
    }
    crumbs.extend(matched);
    crumbs
}
