use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{ApplicationId, StaffApplication};
use crate::ids::UserId;

/// Storage abstraction so the workflows can be exercised in isolation.
///
/// Every method is atomic with respect to the others, which is what keeps
/// the one-application-per-user and single-decision guarantees honest.
pub trait ApplicationStore: Send + Sync {
    /// Inserts `record` unless its user already has one pending.
    fn insert_if_absent_for_user(
        &self,
        record: StaffApplication,
    ) -> Result<StaffApplication, StoreError>;
    fn get(&self, id: &ApplicationId) -> Result<Option<StaffApplication>, StoreError>;
    fn find_by_user(&self, user: UserId) -> Result<Option<StaffApplication>, StoreError>;
    /// Removes and returns the record; only one caller can ever win it.
    fn take(&self, id: &ApplicationId) -> Result<Option<StaffApplication>, StoreError>;
    /// Pending records, oldest first.
    fn list(&self) -> Result<Vec<StaffApplication>, StoreError>;
    /// Drops everything and returns how many records were held.
    fn clear(&self) -> Result<usize, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {} already has pending application {}", .0.applicant.user_id, .0.id)]
    DuplicateUser(Box<StaffApplication>),
    #[error("application id {0} already in use")]
    Conflict(ApplicationId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store; everything is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    records: Mutex<HashMap<ApplicationId, StaffApplication>>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ApplicationId, StaffApplication>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("application store mutex poisoned".to_string()))
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    fn insert_if_absent_for_user(
        &self,
        record: StaffApplication,
    ) -> Result<StaffApplication, StoreError> {
        let mut guard = self.lock()?;
        if let Some(existing) = guard
            .values()
            .find(|pending| pending.user_id() == record.user_id())
        {
            return Err(StoreError::DuplicateUser(Box::new(existing.clone())));
        }
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get(&self, id: &ApplicationId) -> Result<Option<StaffApplication>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn find_by_user(&self, user: UserId) -> Result<Option<StaffApplication>, StoreError> {
        Ok(self
            .lock()?
            .values()
            .find(|record| record.user_id() == user)
            .cloned())
    }

    fn take(&self, id: &ApplicationId) -> Result<Option<StaffApplication>, StoreError> {
        Ok(self.lock()?.remove(id))
    }

    fn list(&self) -> Result<Vec<StaffApplication>, StoreError> {
        let mut records: Vec<_> = self.lock()?.values().cloned().collect();
        records.sort_by(|left, right| {
            left.submitted_at
                .cmp(&right.submitted_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(records)
    }

    fn clear(&self) -> Result<usize, StoreError> {
        let mut guard = self.lock()?;
        let count = guard.len();
        guard.clear();
        Ok(count)
    }
}
