use thiserror::Error;

use crate::menu::MenuError;

/// 启动路径错误
///
/// 只覆盖服务器初始化和运行阶段；请求处理阶段用
/// [`crate::utils::AppError`]。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("菜单定义无效: {0}")]
    MenuDefinition(#[from] MenuError),

    #[error("管理员种子失败: {0}")]
    Bootstrap(String),

    #[error("端口绑定失败: {0}")]
    Bind(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 启动路径的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
