use crate::models::{PaymentModeEntry, PaymentModesRecord, PaymentTermEntry, PaymentTermsRecord};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertPaymentTermsRequest {
    #[validate(length(min = 1, message = "Payment terms are required"))]
    pub terms: Vec<PaymentTermInput>,
}

/// A term as sent by the caller. `days` stays raw JSON so that non-numeric
/// values fall back to 0 instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermInput {
    #[serde(default)]
    pub term_name: Option<String>,
    #[serde(default)]
    pub days: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPaymentModesRequest {
    #[validate(length(min = 1, message = "Payment modes are required"))]
    pub payment_modes: Vec<PaymentModeInput>,
}

/// A mode as sent by the caller, kept as raw JSON so falsy values are skipped
/// rather than failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModeInput {
    #[serde(default)]
    pub payment_mode: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct UpsertResponse<T> {
    pub message: String,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse<T> {
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermsResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub branch_id: String,
    pub terms: Vec<PaymentTermEntry>,
    pub created_by_id: String,
    pub deleted_at: Option<String>,
    pub deleted_by_id: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentTermsRecord> for PaymentTermsResponse {
    fn from(record: PaymentTermsRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            branch_id: record.branch_id.to_hex(),
            terms: record.terms,
            created_by_id: record.created_by_id,
            deleted_at: record.deleted_at.map(rfc3339),
            deleted_by_id: record.deleted_by_id,
            deleted_by: record.deleted_by,
            created_at: rfc3339(record.created_at),
            updated_at: rfc3339(record.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModesResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub branch_id: String,
    pub payment_modes: Vec<PaymentModeEntry>,
    pub created_by_id: String,
    pub deleted_at: Option<String>,
    pub deleted_by_id: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentModesRecord> for PaymentModesResponse {
    fn from(record: PaymentModesRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            branch_id: record.branch_id.to_hex(),
            payment_modes: record.payment_modes,
            created_by_id: record.created_by_id,
            deleted_at: record.deleted_at.map(rfc3339),
            deleted_by_id: record.deleted_by_id,
            deleted_by: record.deleted_by,
            created_at: rfc3339(record.created_at),
            updated_at: rfc3339(record.updated_at),
        }
    }
}

fn rfc3339(value: DateTime) -> String {
    value.to_chrono().to_rfc3339()
}
