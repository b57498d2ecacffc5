use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::models::{PaymentModesRecord, PaymentTermsRecord, Upserted};
use crate::services::modes_policy::PaymentModesUpsert;
use crate::services::terms_policy::PaymentTermsUpsert;

/// Persistence for branch payment settings.
///
/// Upserts must decide between "insert seeded record" and "update existing
/// record" atomically per branch: two concurrent first writes must not both
/// seed defaults.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn find_payment_terms(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentTermsRecord>, AppError>;

    async fn upsert_payment_terms(
        &self,
        upsert: &PaymentTermsUpsert,
    ) -> Result<Upserted<PaymentTermsRecord>, AppError>;

    async fn find_payment_modes(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentModesRecord>, AppError>;

    async fn upsert_payment_modes(
        &self,
        upsert: &PaymentModesUpsert,
    ) -> Result<Upserted<PaymentModesRecord>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
