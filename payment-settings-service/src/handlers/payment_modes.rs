use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::{
    dtos::{FetchResponse, PaymentModesResponse, UpsertPaymentModesRequest, UpsertResponse},
    middleware::ActingUser,
    models::{UpsertOutcome, Upserted},
    services::{metrics::record_modes_upsert, PaymentModesUpsert},
    startup::AppState,
    utils::parse_branch_id,
};

/// Create or replace a branch's payment modes, collapsing case-insensitive duplicates.
pub async fn upsert_payment_modes(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(branch_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpsertPaymentModesRequest>,
) -> Result<Json<UpsertResponse<PaymentModesResponse>>, AppError> {
    let branch_id = parse_branch_id(&branch_id)?;
    let upsert = PaymentModesUpsert::prepare(branch_id, &user_id, &payload.payment_modes)?;

    let Upserted { record, outcome } = state.store.upsert_payment_modes(&upsert).await?;
    record_modes_upsert(outcome);

    tracing::info!(
        branch_id = %branch_id,
        user_id = %user_id,
        outcome = outcome.as_str(),
        mode_count = record.payment_modes.len(),
        "Payment modes saved"
    );

    let message = match outcome {
        UpsertOutcome::Created => "Payment modes created successfully",
        UpsertOutcome::Updated => "Payment modes updated successfully",
    };

    Ok(Json(UpsertResponse {
        message: message.to_string(),
        data: vec![PaymentModesResponse::from(record)],
    }))
}

pub async fn get_payment_modes(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Json<FetchResponse<PaymentModesResponse>>, AppError> {
    let branch_id = parse_branch_id(&branch_id)?;

    tracing::debug!(branch_id = %branch_id, "Fetching payment modes");

    let record = state.store.find_payment_modes(branch_id).await?;

    Ok(Json(FetchResponse {
        data: record.map(PaymentModesResponse::from),
    }))
}
