//! 菜单定义注册表
//!
//! 持有平台的静态菜单树，构造时快速失败校验。
//! 注册表由 [`crate::core::ServerState`] 持有并注入，
//! 不使用任何环境全局状态；每个请求的角色来自已验证的 JWT claims。

use std::collections::HashSet;

use thiserror::Error;

use shared::models::menu::{MenuNode, RouteEntry};
use shared::models::role::Role;

use super::locate;
use super::tree;

/// 菜单定义错误
///
/// 菜单是配置，坏定义应在启动时炸掉，而不是静默产出残缺的树。
#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    #[error("menu node has empty key")]
    EmptyKey,

    #[error("menu key must start with '/': {0}")]
    RelativeKey(String),

    #[error("duplicate menu key: {0}")]
    DuplicateKey(String),

    #[error("menu node {0} has empty label")]
    EmptyLabel(String),

    #[error("menu node {0} declares an empty children list")]
    EmptyChildren(String),
}

/// 菜单注册表
#[derive(Debug, Clone)]
pub struct MenuRegistry {
    nodes: Vec<MenuNode>,
}

impl MenuRegistry {
    /// 校验并持有一棵菜单树
    pub fn new(nodes: Vec<MenuNode>) -> Result<Self, MenuError> {
        let mut seen = HashSet::new();
        validate_nodes(&nodes, &mut seen)?;
        Ok(Self { nodes })
    }

    /// 平台内置菜单
    pub fn platform() -> Result<Self, MenuError> {
        Self::new(platform_menu())
    }

    /// 完整 (未裁剪) 菜单树
    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    /// 指定角色可见的菜单树
    pub fn menu_for(&self, role: Role) -> Vec<MenuNode> {
        tree::derive_menu(&self.nodes, role)
    }

    /// 指定角色的扁平路由表
    pub fn routes_for(&self, role: Role) -> Vec<RouteEntry> {
        tree::flatten_routes(&self.menu_for(role))
    }

    /// 当前路径在指定角色菜单中的展开键
    pub fn open_keys_for(&self, role: Role, current_path: &str) -> Vec<String> {
        locate::open_keys(current_path, &self.menu_for(role))
    }

    /// 当前路径在指定角色菜单中的面包屑
    pub fn breadcrumbs_for(
        &self,
        role: Role,
        current_path: &str,
    ) -> Vec<shared::models::menu::Breadcrumb> {
        locate::breadcrumb_path(current_path, &self.menu_for(role))
    }
}

fn validate_nodes(nodes: &[MenuNode], seen: &mut HashSet<String>) -> Result<(), MenuError> {
    for node in nodes {
        if node.key.is_empty() {
            return Err(MenuError::EmptyKey);
        }
        if !node.key.starts_with('/') {
            return Err(MenuError::RelativeKey(node.key.clone()));
        }
        if !seen.insert(node.key.clone()) {
            return Err(MenuError::DuplicateKey(node.key.clone()));
        }
        if node.label.trim().is_empty() {
            return Err(MenuError::EmptyLabel(node.key.clone()));
        }
        if let Some(children) = &node.children {
            // 定义层面 Some(空列表) 是笔误：要么是叶子，要么有子节点
            if children.is_empty() {
                return Err(MenuError::EmptyChildren(node.key.clone()));
            }
            validate_nodes(children, seen)?;
        }
    }
    Ok(())
}

/// 平台菜单定义
///
/// 与管理后台的侧边栏一一对应。新增页面时在这里加节点即可。
fn platform_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::leaf("/admin/dashboard", "看板").with_icon("dashboard"),
        MenuNode::leaf("/admin/info", "个人中心")
            .with_icon("user")
            .with_roles([Role::Doctor]),
        MenuNode::leaf("/admin/clinic", "诊所管理")
            .with_icon("clinic")
            .with_roles([Role::ClinicManager, Role::Admin])
            .with_children(vec![
                MenuNode::leaf("/admin/clinic/list", "诊所列表").with_roles([Role::Admin]),
                MenuNode::leaf("/admin/clinic/audit", "诊所审核").with_roles([Role::Admin]),
                MenuNode::leaf("/admin/clinic/info", "诊所详情")
                    .with_roles([Role::ClinicManager]),
                MenuNode::leaf("/admin/clinic/application", "信息修改")
                    .with_roles([Role::ClinicManager]),
                MenuNode::leaf("/admin/clinic/audit-log", "审核记录")
                    .with_roles([Role::ClinicManager]),
            ]),
        MenuNode::leaf("/admin/doctor", "医生管理")
            .with_icon("doctor")
            .with_roles([Role::ClinicManager])
            .with_children(vec![
                MenuNode::leaf("/admin/doctor/list", "医生列表").with_roles([Role::ClinicManager]),
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_menu_is_valid() {
        let registry = MenuRegistry::platform().expect("built-in menu must validate");
        assert!(!registry.nodes().is_empty());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let nodes = vec![
            MenuNode::leaf("/admin/a", "A"),
            MenuNode::leaf("/admin/a", "B"),
        ];
        assert_eq!(
            MenuRegistry::new(nodes).unwrap_err(),
            MenuError::DuplicateKey("/admin/a".into())
        );
    }

    #[test]
    fn test_duplicate_nested_key_rejected() {
        let nodes = vec![
            MenuNode::leaf("/admin/a", "A")
                .with_children(vec![MenuNode::leaf("/admin/b", "B")]),
            MenuNode::leaf("/admin/b", "B again"),
        ];
        assert!(MenuRegistry::new(nodes).is_err());
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let nodes = vec![MenuNode::leaf("", "nameless")];
        assert_eq!(MenuRegistry::new(nodes).unwrap_err(), MenuError::EmptyKey);
    }

    #[test]
    fn test_relative_key_rejected() {
        let nodes = vec![MenuNode::leaf("admin/a", "A")];
        assert_eq!(
            MenuRegistry::new(nodes).unwrap_err(),
            MenuError::RelativeKey("admin/a".into())
        );
    }

    #[test]
    fn test_empty_children_list_rejected() {
        let nodes = vec![MenuNode::leaf("/admin/a", "A").with_children(vec![])];
        assert_eq!(
            MenuRegistry::new(nodes).unwrap_err(),
            MenuError::EmptyChildren("/admin/a".into())
        );
    }

    #[test]
    fn test_manager_menu_matches_sidebar() {
        let registry = MenuRegistry::platform().unwrap();
        let keys: Vec<String> = registry
            .routes_for(Role::ClinicManager)
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(
            keys,
            [
                "/admin/dashboard",
                "/admin/clinic",
                "/admin/clinic/info",
                "/admin/clinic/application",
                "/admin/clinic/audit-log",
                "/admin/doctor",
                "/admin/doctor/list",
            ]
        );
    }
}
