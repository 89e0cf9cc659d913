//! 角色驱动的菜单树裁剪与路由扁平化
//!
//! 登录时派生一次，之后每次导航重新派生以同步面包屑。
//! 输入树不被修改，输出是新树。

use shared::models::menu::{MenuNode, RouteEntry};
use shared::models::role::Role;

/// 按角色裁剪菜单树
///
/// 深度优先、前序遍历。规则：
///
/// 1. 先递归过滤子节点；
/// 2. 原本有子节点、过滤后一个不剩的分支整个丢弃，
///    即使分支自身没有角色限制 (它存在的意义就是装子节点)；
/// 3. 节点自身：`roles` 缺省对所有角色可见，否则要求角色命中；
/// 4. 顺序保持源顺序，不排序。
///
/// 未知角色不是错误，只会得到最大程度的裁剪 (仅无限制节点存活)。
pub fn derive_menu(tree: &[MenuNode], role: Role) -> Vec<MenuNode> {
    tree.iter()
        .filter_map(|node| filter_node(node, role))
        .collect()
}

fn filter_node(node: &MenuNode, role: Role) -> Option<MenuNode> {
    // 子节点先过滤；被剪空的分支直接丢弃
    let children = match &node.children {
        Some(kids) => {
            let surviving: Vec<MenuNode> =
                kids.iter().filter_map(|c| filter_node(c, role)).collect();
            if surviving.is_empty() {
                return None;
            }
            Some(surviving)
        }
        None => None,
    };

    if !node.visible_to(role) {
        return None;
    }

    Some(MenuNode {
        key: node.key.clone(),
        label: node.label.clone(),
        icon: node.icon.clone(),
        roles: node.roles.clone(),
        children,
    })
}

/// 前序扁平化已裁剪的菜单树
///
/// 每个节点 (父和子) 恰好出现一次；层级只体现在列表顺序里，
/// 条目本身不再携带 children。
pub fn flatten_routes(filtered: &[MenuNode]) -> Vec<RouteEntry> {
    let mut routes = Vec::new();
    flatten_into(filtered, &mut routes);
    routes
}

fn flatten_into(nodes: &[MenuNode], out: &mut Vec<RouteEntry>) {
    for node in nodes {
        out.push(RouteEntry {
            key: node.key.clone(),
            label: node.label.clone(),
            roles: node.roles.clone(),
        });
        if let Some(children) = &node.children {
            flatten_into(children, out);
        }
    }
}
