use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{PaymentModesRecord, PaymentTermsRecord, Upserted};
use crate::services::modes_policy::PaymentModesUpsert;
use crate::services::store::SettingsStore;
use crate::services::terms_policy::PaymentTermsUpsert;

/// Process-local store for development and tests. Each upsert decides and
/// writes under the collection lock.
#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    payment_terms: Arc<Mutex<HashMap<ObjectId, PaymentTermsRecord>>>,
    payment_modes: Arc<Mutex<HashMap<ObjectId, PaymentModesRecord>>>,
    operations: Arc<AtomicUsize>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups and writes served so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn find_payment_terms(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentTermsRecord>, AppError> {
        self.record_operation();
        Ok(self.payment_terms.lock().await.get(&branch_id).cloned())
    }

    async fn upsert_payment_terms(
        &self,
        upsert: &PaymentTermsUpsert,
    ) -> Result<Upserted<PaymentTermsRecord>, AppError> {
        self.record_operation();
        let mut records = self.payment_terms.lock().await;
        let existing = records.get(&upsert.branch_id).cloned();
        let result = upsert.apply(existing, DateTime::now());
        records.insert(upsert.branch_id, result.record.clone());
        Ok(result)
    }

    async fn find_payment_modes(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentModesRecord>, AppError> {
        self.record_operation();
        Ok(self.payment_modes.lock().await.get(&branch_id).cloned())
    }

    async fn upsert_payment_modes(
        &self,
        upsert: &PaymentModesUpsert,
    ) -> Result<Upserted<PaymentModesRecord>, AppError> {
        self.record_operation();
        let mut records = self.payment_modes.lock().await;
        let existing = records.get(&upsert.branch_id).cloned();
        let result = upsert.apply(existing, DateTime::now());
        records.insert(upsert.branch_id, result.record.clone());
        Ok(result)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
