use indexmap::IndexMap;
use mongodb::bson::{self, oid::ObjectId};
use serde_json::Value;
use service_core::error::AppError;

use crate::dtos::PaymentModeInput;
use crate::models::{PaymentModeEntry, PaymentModesRecord, UpsertOutcome, Upserted};

/// Name carried by one caller entry. Missing and falsy values (`null`,
/// `false`, `0`, `""`) yield `None`; any other non-string is rejected.
fn mode_name(value: Option<&Value>) -> Result<Option<&str>, AppError> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(name)) if name.is_empty() => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => Ok(None),
        Some(other) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Payment mode must be a string, got {}",
            other
        ))),
    }
}

/// Collapses modes that differ only by case or surrounding whitespace.
///
/// The last spelling of a mode wins, but it keeps the position where the mode
/// first appeared. Missing and falsy modes are dropped.
pub fn dedup_payment_modes(
    input: &[PaymentModeInput],
) -> Result<Vec<PaymentModeEntry>, AppError> {
    let mut modes: IndexMap<String, PaymentModeEntry> = IndexMap::new();

    for mode in input {
        let Some(raw) = mode_name(mode.payment_mode.as_ref())? else {
            continue;
        };
        let display = raw.trim();
        modes.insert(
            display.to_lowercase(),
            PaymentModeEntry {
                payment_mode: display.to_string(),
            },
        );
    }

    Ok(modes.into_values().collect())
}

/// A validated payment modes write for one branch.
#[derive(Debug, Clone)]
pub struct PaymentModesUpsert {
    pub branch_id: ObjectId,
    pub acting_user_id: String,
    pub payment_modes: Vec<PaymentModeEntry>,
}

impl PaymentModesUpsert {
    pub fn prepare(
        branch_id: ObjectId,
        acting_user_id: &str,
        input: &[PaymentModeInput],
    ) -> Result<Self, AppError> {
        if acting_user_id.trim().is_empty() {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Acting user is required"
            )));
        }
        if input.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment modes are required"
            )));
        }

        let payment_modes = dedup_payment_modes(input)?;
        if payment_modes.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Valid payment modes required"
            )));
        }

        Ok(Self {
            branch_id,
            acting_user_id: acting_user_id.to_string(),
            payment_modes,
        })
    }

    pub fn apply(
        &self,
        existing: Option<PaymentModesRecord>,
        now: bson::DateTime,
    ) -> Upserted<PaymentModesRecord> {
        match existing {
            None => Upserted {
                record: PaymentModesRecord::new(
                    self.branch_id,
                    self.payment_modes.clone(),
                    self.acting_user_id.clone(),
                    now,
                ),
                outcome: UpsertOutcome::Created,
            },
            Some(mut record) => {
                record.payment_modes = self.payment_modes.clone();
                record.clear_soft_delete();
                record.updated_at = now;
                Upserted {
                    record,
                    outcome: UpsertOutcome::Updated,
                }
            }
        }
    }
}
