//! Account Model
//!
//! 平台账号：管理员、诊所管理员、医生共用同一张表，由 `role` 区分。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// 账号状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Disabled,
}

/// 平台账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    /// argon2 哈希，永不下发
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: AccountStatus,
    /// 诊所管理员所属诊所 (提交的申请获批后建立关联)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = Account::hash_password("s3cret-pass").expect("hashing should succeed");
        let account = Account {
            account_id: 1,
            username: "manager".into(),
            hash_pass: hash,
            email: "m@example.com".into(),
            phone: "13800000000".into(),
            role: Role::ClinicManager,
            status: AccountStatus::Active,
            clinic_id: None,
            created_at: Utc::now(),
        };

        assert!(account.verify_password("s3cret-pass").unwrap());
        assert!(!account.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_hash_pass_never_serialized() {
        let account = Account {
            account_id: 1,
            username: "admin".into(),
            hash_pass: "$argon2$secret".into(),
            email: "a@example.com".into(),
            phone: "13800000000".into(),
            role: Role::Admin,
            status: AccountStatus::Active,
            clinic_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("hash_pass").is_none());
    }
}
