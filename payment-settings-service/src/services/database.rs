use async_trait::async_trait;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Client as MongoClient, Collection, Database, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use service_core::error::AppError;

use crate::models::{PaymentModesRecord, PaymentTermsRecord, UpsertOutcome, Upserted};
use crate::services::modes_policy::PaymentModesUpsert;
use crate::services::store::SettingsStore;
use crate::services::terms_policy::PaymentTermsUpsert;

const PAYMENT_TERMS_COLLECTION: &str = "payment_terms";
const PAYMENT_MODES_COLLECTION: &str = "payment_modes";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoSettingsStore {
    client: MongoClient,
    db: Database,
}

impl MongoSettingsStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Unique `branchId` indexes back the one-record-per-branch invariant and
    /// turn concurrent first writes into duplicate-key errors.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for payment-settings-service");

        self.payment_terms()
            .create_index(unique_branch_index("payment_terms_branch_unique"), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create branch index on payment_terms: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on payment_terms.branchId");

        self.payment_modes()
            .create_index(unique_branch_index("payment_modes_branch_unique"), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create branch index on payment_modes: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on payment_modes.branchId");

        Ok(())
    }

    pub fn payment_terms(&self) -> Collection<PaymentTermsRecord> {
        self.db.collection(PAYMENT_TERMS_COLLECTION)
    }

    pub fn payment_modes(&self) -> Collection<PaymentModesRecord> {
        self.db.collection(PAYMENT_MODES_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn unique_branch_index(name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "branchId": 1 })
        .options(
            IndexOptions::builder()
                .name(name.to_string())
                .unique(true)
                .build(),
        )
        .build()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// `$set` payload shared by every update: new content, fresh `updatedAt`,
/// cleared soft-delete markers.
fn update_payload(field: &str, content: Bson, now: DateTime) -> Document {
    let mut payload = doc! {
        "updatedAt": now,
        "deletedAt": Bson::Null,
        "deletedById": Bson::Null,
        "deletedBy": Bson::Null,
    };
    payload.insert(field, content);
    payload
}

/// Insert the seeded record when the branch has none; otherwise, or when a
/// concurrent request inserts first, update without seeding.
async fn upsert_by_branch<T>(
    collection: &Collection<T>,
    branch_id: ObjectId,
    acting_user_id: &str,
    seeded: T,
    set: Document,
    now: DateTime,
) -> Result<Upserted<T>, AppError>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    let filter = doc! { "branchId": branch_id };

    if collection.find_one(filter.clone(), None).await?.is_none() {
        match collection.insert_one(&seeded, None).await {
            Ok(_) => {
                return Ok(Upserted {
                    record: seeded,
                    outcome: UpsertOutcome::Created,
                })
            }
            Err(e) if is_duplicate_key(&e) => {
                tracing::info!(
                    branch_id = %branch_id,
                    collection = %collection.name(),
                    "Branch record created concurrently, updating instead"
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    let update = doc! {
        "$set": set,
        "$setOnInsert": { "createdById": acting_user_id, "createdAt": now },
    };
    let options = FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build();

    let record = collection
        .find_one_and_update(filter, update, options)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Upsert on {} returned no document",
                collection.name()
            ))
        })?;

    Ok(Upserted {
        record,
        outcome: UpsertOutcome::Updated,
    })
}

#[async_trait]
impl SettingsStore for MongoSettingsStore {
    async fn find_payment_terms(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentTermsRecord>, AppError> {
        Ok(self
            .payment_terms()
            .find_one(doc! { "branchId": branch_id }, None)
            .await?)
    }

    async fn upsert_payment_terms(
        &self,
        upsert: &PaymentTermsUpsert,
    ) -> Result<Upserted<PaymentTermsRecord>, AppError> {
        let now = DateTime::now();
        let seeded = upsert.apply(None, now).record;
        let set = update_payload("terms", bson::to_bson(&upsert.terms)?, now);

        upsert_by_branch(
            &self.payment_terms(),
            upsert.branch_id,
            &upsert.acting_user_id,
            seeded,
            set,
            now,
        )
        .await
    }

    async fn find_payment_modes(
        &self,
        branch_id: ObjectId,
    ) -> Result<Option<PaymentModesRecord>, AppError> {
        Ok(self
            .payment_modes()
            .find_one(doc! { "branchId": branch_id }, None)
            .await?)
    }

    async fn upsert_payment_modes(
        &self,
        upsert: &PaymentModesUpsert,
    ) -> Result<Upserted<PaymentModesRecord>, AppError> {
        let now = DateTime::now();
        let seeded = upsert.apply(None, now).record;
        let set = update_payload("paymentModes", bson::to_bson(&upsert.payment_modes)?, now);

        upsert_by_branch(
            &self.payment_modes(),
            upsert.branch_id,
            &upsert.acting_user_id,
            seeded,
            set,
            now,
        )
        .await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
