//! 菜单派生核心
//!
//! 纯数据变换，无 I/O：
//! - [`tree::derive_menu`] - 按角色裁剪菜单树
//! - [`tree::flatten_routes`] - 前序扁平化为路由表
//! - [`locate::open_keys`] / [`locate::breadcrumb_path`] - 导航定位
//! - [`MenuRegistry`] - 菜单定义的快速失败校验与持有

pub mod locate;
pub mod registry;
pub mod tree;

pub use registry::{MenuError, MenuRegistry};
pub use tree::{derive_menu, flatten_routes};
