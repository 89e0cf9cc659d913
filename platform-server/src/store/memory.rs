//! 进程内存储实现
//!
//! DashMap 表 + 原子序列分配 id。开发与测试用；生产部署把
//! [`super`] 中的 trait 接到真正的网络存储上即可，核心逻辑不变。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use shared::models::account::Account;
use shared::models::application::ApplicationLog;
use shared::models::clinic::Clinic;
use shared::models::doctor::Doctor;

use super::{
    AccountStore, ApplicationLogFilter, ApplicationLogStore, ClinicFilter, ClinicStore,
    DoctorFilter, DoctorStore, NewAccount, StoreError, StoreResult,
};

/// 单调递增的 id 序列
#[derive(Debug)]
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(0))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// 内存存储：所有资源表的单一实现
#[derive(Debug)]
pub struct MemoryStore {
    accounts: DashMap<i64, Account>,
    clinics: DashMap<i64, Clinic>,
    doctors: DashMap<i64, Doctor>,
    application_logs: DashMap<i64, ApplicationLog>,
    account_seq: Sequence,
    clinic_seq: Sequence,
    doctor_seq: Sequence,
    log_seq: Sequence,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            clinics: DashMap::new(),
            doctors: DashMap::new(),
            application_logs: DashMap::new(),
            account_seq: Sequence::new(),
            clinic_seq: Sequence::new(),
            doctor_seq: Sequence::new(),
            log_seq: Sequence::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_id(&self, account_id: i64) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get(&account_id).map(|a| a.clone()))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.username == username)
            .map(|a| a.clone()))
    }

    async fn create(&self, account: NewAccount) -> StoreResult<Account> {
        if self.find_by_username(&account.username).await?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "username already taken: {}",
                account.username
            )));
        }

        let account_id = self.account_seq.next();
        let record = Account {
            account_id,
            username: account.username,
            hash_pass: account.hash_pass,
            email: account.email,
            phone: account.phone,
            role: account.role,
            status: account.status,
            clinic_id: account.clinic_id,
            created_at: Utc::now(),
        };
        self.accounts.insert(account_id, record.clone());
        Ok(record)
    }

    async fn link_clinic(&self, account_id: i64, clinic_id: i64) -> StoreResult<Account> {
        let mut entry = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| StoreError::NotFound(format!("account {account_id}")))?;
        entry.clinic_id = Some(clinic_id);
        Ok(entry.clone())
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn list(&self, filter: &ClinicFilter) -> StoreResult<Vec<Clinic>> {
        let mut clinics: Vec<Clinic> = self
            .clinics
            .iter()
            .filter(|c| {
                filter
                    .name
                    .as_ref()
                    .is_none_or(|needle| c.name.contains(needle.as_str()))
                    && filter.status.is_none_or(|s| c.status == s)
            })
            .map(|c| c.clone())
            .collect();
        clinics.sort_by_key(|c| c.clinic_id);
        Ok(clinics)
    }

    async fn find_by_id(&self, clinic_id: i64) -> StoreResult<Option<Clinic>> {
        Ok(self.clinics.get(&clinic_id).map(|c| c.clone()))
    }

    async fn reserve_id(&self) -> StoreResult<i64> {
        Ok(self.clinic_seq.next())
    }

    async fn upsert(&self, clinic: Clinic) -> StoreResult<Clinic> {
        self.clinics.insert(clinic.clinic_id, clinic.clone());
        Ok(clinic)
    }

    async fn delete(&self, clinic_id: i64) -> StoreResult<bool> {
        Ok(self.clinics.remove(&clinic_id).is_some())
    }
}

#[async_trait]
impl DoctorStore for MemoryStore {
    async fn list(&self, clinic_id: i64, filter: &DoctorFilter) -> StoreResult<Vec<Doctor>> {
        let mut doctors: Vec<Doctor> = self
            .doctors
            .iter()
            .filter(|d| {
                d.clinic_id == clinic_id
                    && filter
                        .name
                        .as_ref()
                        .is_none_or(|needle| d.name.contains(needle.as_str()))
                    && filter
                        .specialty
                        .as_ref()
                        .is_none_or(|needle| d.specialty.contains(needle.as_str()))
            })
            .map(|d| d.clone())
            .collect();
        doctors.sort_by_key(|d| d.doctor_id);
        Ok(doctors)
    }

    async fn find_by_id(&self, doctor_id: i64) -> StoreResult<Option<Doctor>> {
        Ok(self.doctors.get(&doctor_id).map(|d| d.clone()))
    }

    async fn create(&self, mut doctor: Doctor) -> StoreResult<Doctor> {
        doctor.doctor_id = self.doctor_seq.next();
        self.doctors.insert(doctor.doctor_id, doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, doctor: Doctor) -> StoreResult<Doctor> {
        if !self.doctors.contains_key(&doctor.doctor_id) {
            return Err(StoreError::NotFound(format!("doctor {}", doctor.doctor_id)));
        }
        self.doctors.insert(doctor.doctor_id, doctor.clone());
        Ok(doctor)
    }

    async fn delete(&self, doctor_id: i64) -> StoreResult<bool> {
        Ok(self.doctors.remove(&doctor_id).is_some())
    }
}

#[async_trait]
impl ApplicationLogStore for MemoryStore {
    async fn list(&self, filter: &ApplicationLogFilter) -> StoreResult<Vec<ApplicationLog>> {
        Ok(self
            .application_logs
            .iter()
            .filter(|e| {
                filter
                    .name
                    .as_ref()
                    .is_none_or(|needle| e.name.contains(needle.as_str()))
                    && filter.audit_result.is_none_or(|s| e.audit_result == s)
                    && filter.from.is_none_or(|t| e.operation_time >= t)
                    && filter.to.is_none_or(|t| e.operation_time <= t)
            })
            .map(|e| e.clone())
            .collect())
    }

    async fn list_by_clinic(&self, clinic_id: i64) -> StoreResult<Vec<ApplicationLog>> {
        Ok(self
            .application_logs
            .iter()
            .filter(|e| e.clinic_id == clinic_id)
            .map(|e| e.clone())
            .collect())
    }

    async fn find_by_id(&self, log_id: i64) -> StoreResult<Option<ApplicationLog>> {
        Ok(self.application_logs.get(&log_id).map(|e| e.clone()))
    }

    async fn find_pending_by_clinic(
        &self,
        clinic_id: i64,
    ) -> StoreResult<Option<ApplicationLog>> {
        Ok(self
            .application_logs
            .iter()
            .find(|e| e.clinic_id == clinic_id && !e.audit_result.is_terminal())
            .map(|e| e.clone()))
    }

    async fn insert(&self, mut entry: ApplicationLog) -> StoreResult<ApplicationLog> {
        entry.log_id = self.log_seq.next();
        self.application_logs.insert(entry.log_id, entry.clone());
        Ok(entry)
    }

    async fn replace(&self, entry: ApplicationLog) -> StoreResult<ApplicationLog> {
        if !self.application_logs.contains_key(&entry.log_id) {
            return Err(StoreError::NotFound(format!("application log {}", entry.log_id)));
        }
        self.application_logs.insert(entry.log_id, entry.clone());
        Ok(entry)
    }

    async fn remove(&self, log_id: i64) -> StoreResult<bool> {
        Ok(self.application_logs.remove(&log_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::account::AccountStatus;
    use shared::models::role::Role;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            hash_pass: "$argon2$x".into(),
            email: format!("{username}@example.com"),
            phone: "13800000000".into(),
            role: Role::ClinicManager,
            status: AccountStatus::Active,
            clinic_id: None,
        }
    }

    // create/find_by_id 在多个 trait 上都有定义，测试里用限定语法

    #[tokio::test]
    async fn test_account_ids_are_allocated_in_order() {
        let store = MemoryStore::new();
        let a = AccountStore::create(&store, new_account("a")).await.unwrap();
        let b = AccountStore::create(&store, new_account("b")).await.unwrap();
        assert!(b.account_id > a.account_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        AccountStore::create(&store, new_account("a")).await.unwrap();
        let err = AccountStore::create(&store, new_account("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_link_clinic() {
        let store = MemoryStore::new();
        let account = AccountStore::create(&store, new_account("manager"))
            .await
            .unwrap();
        let clinic_id = store.reserve_id().await.unwrap();

        let linked = store
            .link_clinic(account.account_id, clinic_id)
            .await
            .unwrap();
        assert_eq!(linked.clinic_id, Some(clinic_id));

        let reread = AccountStore::find_by_id(&store, account.account_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reread.clinic_id, Some(clinic_id));
    }
}
