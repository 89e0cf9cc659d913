//! Menu Model
//!
//! 声明式导航树。节点可选地按角色门控，可选地携带子节点。
//! `children` 缺省与空列表语义不同：缺省表示叶子节点，
//! 空列表表示被剪空的分支 (派生结果里不会出现后者)。

use serde::{Deserialize, Serialize};

use super::role::Role;

/// 菜单节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    /// 路由键，路径形式，全树唯一
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// 缺省表示对所有角色可见
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// 叶子节点 (无子节点、无图标)
    pub fn leaf(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: None,
            roles: None,
            children: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// 节点对指定角色是否可见 (不考虑子节点存活情况)
    pub fn visible_to(&self, role: Role) -> bool {
        self.roles.as_ref().is_none_or(|rs| rs.contains(&role))
    }
}

/// 扁平化的路由条目 (children 只体现在列表顺序里)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

/// 面包屑条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub key: String,
    pub label: String,
}
