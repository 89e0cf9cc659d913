//! 核心模块
//!
//! 配置、服务器状态、启动路径错误。

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::{ServerState, Stores};
