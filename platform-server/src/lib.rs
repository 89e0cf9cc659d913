//! 牙科诊所平台管理后台服务端
//!
//! # 架构概述
//!
//! - **菜单派生** (`menu`): 角色驱动的菜单裁剪、路由扁平化、导航定位
//! - **审核引擎** (`audit`): 申请历史、前后快照差异、审批状态迁移
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **存储接缝** (`store`): 外部日志存储的 trait 抽象 + 内存实现
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! platform-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、角色中间件
//! ├── menu/          # 菜单派生核心
//! ├── audit/         # 审核/差异核心
//! ├── store/         # 存储接缝
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误响应、日志、输入校验
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod menu;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 .env 并初始化日志
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
