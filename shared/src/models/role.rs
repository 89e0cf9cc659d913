//! Role Model

use serde::{Deserialize, Serialize};

/// 操作员角色 (固定集合，控制菜单/路由可见性)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// 平台管理员
    Admin,
    /// 诊所管理员
    ClinicManager,
    /// 医生
    Doctor,
}

impl Role {
    /// 角色的 snake_case 字符串形式 (JWT claims 中使用)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ClinicManager => "clinic_manager",
            Role::Doctor => "doctor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "clinic_manager" => Ok(Role::ClinicManager),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
