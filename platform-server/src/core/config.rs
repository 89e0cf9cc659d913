use crate::auth::JwtConfig;

/// 服务器配置 - 平台后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BOOTSTRAP_ADMIN_USERNAME | admin | 初始管理员用户名 |
/// | BOOTSTRAP_ADMIN_PASSWORD | (无) | 初始管理员密码，未设置则不种子 |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
/// | LOG_LEVEL | info | 日志级别 |
///
/// JWT 相关变量 (JWT_SECRET 等) 见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 BOOTSTRAP_ADMIN_PASSWORD=changeme cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 初始管理员用户名
    pub bootstrap_admin_username: String,
    /// 初始管理员密码 (未设置则跳过种子)
    pub bootstrap_admin_password: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            bootstrap_admin_username: std::env::var("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".into()),
            bootstrap_admin_password: std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, bootstrap_admin_password: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.bootstrap_admin_password = bootstrap_admin_password;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
