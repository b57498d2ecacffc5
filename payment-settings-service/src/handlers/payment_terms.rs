//! Payment terms handlers.
//!
//! Branch ids and the acting user are validated before the store is touched.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::{
    dtos::{FetchResponse, PaymentTermsResponse, UpsertPaymentTermsRequest, UpsertResponse},
    middleware::ActingUser,
    models::{UpsertOutcome, Upserted},
    services::{metrics::record_terms_upsert, PaymentTermsUpsert},
    startup::AppState,
    utils::parse_branch_id,
};

/// Create or replace a branch's payment terms. The first write for a branch
/// also seeds the default due-date terms.
pub async fn upsert_payment_terms(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(branch_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpsertPaymentTermsRequest>,
) -> Result<Json<UpsertResponse<PaymentTermsResponse>>, AppError> {
    let branch_id = parse_branch_id(&branch_id)?;
    let upsert = PaymentTermsUpsert::prepare(branch_id, &user_id, &payload.terms, &Local::now())?;

    let Upserted { record, outcome } = state.store.upsert_payment_terms(&upsert).await?;
    record_terms_upsert(outcome);

    tracing::info!(
        branch_id = %branch_id,
        user_id = %user_id,
        outcome = outcome.as_str(),
        term_count = record.terms.len(),
        "Payment terms saved"
    );

    let message = match outcome {
        UpsertOutcome::Created => "Payment terms created with default terms",
        UpsertOutcome::Updated => "Payment terms updated successfully",
    };

    Ok(Json(UpsertResponse {
        message: message.to_string(),
        data: vec![PaymentTermsResponse::from(record)],
    }))
}

pub async fn get_payment_terms(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Json<FetchResponse<PaymentTermsResponse>>, AppError> {
    let branch_id = parse_branch_id(&branch_id)?;

    tracing::debug!(branch_id = %branch_id, "Fetching payment terms");

    let record = state.store.find_payment_terms(branch_id).await?;

    Ok(Json(FetchResponse {
        data: record.map(PaymentTermsResponse::from),
    }))
}
