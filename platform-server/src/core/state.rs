use std::sync::Arc;

use shared::models::account::AccountStatus;
use shared::models::role::Role;

use crate::audit::AuditService;
use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::menu::MenuRegistry;
use crate::store::{
    AccountStore, ApplicationLogStore, ClinicStore, DoctorStore, MemoryStore, NewAccount,
    StoreError,
};

/// 注入的存储协作方
///
/// 每种资源一个 trait 对象；默认全部由同一个 [`MemoryStore`]
/// 承担，生产部署可以逐个换成网络存储而不动其余代码。
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub clinics: Arc<dyn ClinicStore>,
    pub doctors: Arc<dyn DoctorStore>,
    pub application_logs: Arc<dyn ApplicationLogStore>,
}

impl Stores {
    /// 全部接到一个内存存储上
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            accounts: store.clone(),
            clinics: store.clone(),
            doctors: store.clone(),
            application_logs: store,
        }
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | stores | Stores | 存储接缝 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | menu | Arc<MenuRegistry> | 已校验的平台菜单 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 存储接缝
    pub stores: Stores,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 平台菜单注册表 (启动时校验，之后只读)
    pub menu: Arc<MenuRegistry>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 菜单注册表 (定义有误直接失败)
    /// 2. 存储 (内存实现)
    /// 3. JWT 服务
    /// 4. 管理员种子 (配置了初始密码且账号不存在时)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let menu = MenuRegistry::platform()?;
        let stores = Stores::in_memory();
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            stores,
            jwt_service,
            menu: Arc::new(menu),
        };
        state.seed_bootstrap_admin().await?;
        Ok(state)
    }

    /// 审核服务 (借用存储接缝，按需构造)
    pub fn audit_service(&self) -> AuditService {
        AuditService::new(
            self.stores.application_logs.clone(),
            self.stores.clinics.clone(),
            self.stores.accounts.clone(),
        )
    }

    /// 种子初始管理员账号
    ///
    /// 未配置 BOOTSTRAP_ADMIN_PASSWORD 则跳过；账号已存在则跳过。
    async fn seed_bootstrap_admin(&self) -> Result<()> {
        let Some(password) = &self.config.bootstrap_admin_password else {
            tracing::debug!("bootstrap admin password not set, skipping seed");
            return Ok(());
        };

        let username = &self.config.bootstrap_admin_username;
        let existing = self
            .stores
            .accounts
            .find_by_username(username)
            .await
            .map_err(|e| ServerError::Bootstrap(e.to_string()))?;
        if existing.is_some() {
            return Ok(());
        }

        let hash_pass = shared::models::account::Account::hash_password(password)
            .map_err(|e| ServerError::Bootstrap(format!("password hash failed: {e}")))?;

        match self
            .stores
            .accounts
            .create(NewAccount {
                username: username.clone(),
                hash_pass,
                email: format!("{username}@platform.local"),
                phone: String::new(),
                role: Role::Admin,
                status: AccountStatus::Active,
                clinic_id: None,
            })
            .await
        {
            Ok(account) => {
                tracing::info!(username = %account.username, "bootstrap admin seeded");
                Ok(())
            }
            // 并发启动时另一个实例先种上了
            Err(StoreError::Duplicate(_)) => Ok(()),
            Err(e) => Err(ServerError::Bootstrap(e.to_string())),
        }
    }
}
