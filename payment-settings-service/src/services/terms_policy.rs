//! Payment terms upsert rules.
//!
//! The first write for a branch seeds three default terms ahead of the
//! caller's; later writes replace the terms with the caller's alone and keep
//! the original creator.

use chrono::{DateTime, TimeZone};
use mongodb::bson::{self, oid::ObjectId};
use service_core::error::AppError;

use crate::dtos::PaymentTermInput;
use crate::models::{PaymentTermEntry, PaymentTermsRecord, UpsertOutcome, Upserted};
use crate::services::date_window::{days_to_end_of_month, days_to_end_of_next_month};

pub const DUE_ON_RECEIPT: &str = "Due on Receipt";
pub const DUE_END_OF_MONTH: &str = "Due end of the month";
pub const DUE_END_OF_NEXT_MONTH: &str = "Due end of next month";

/// Defaults seeded on first creation, in their fixed order.
pub fn default_terms<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<PaymentTermEntry> {
    vec![
        PaymentTermEntry::new(DUE_ON_RECEIPT, 0),
        PaymentTermEntry::new(DUE_END_OF_MONTH, days_to_end_of_month(now)),
        PaymentTermEntry::new(DUE_END_OF_NEXT_MONTH, days_to_end_of_next_month(now)),
    ]
}

pub fn normalize_term(input: &PaymentTermInput) -> PaymentTermEntry {
    let term_name = input.term_name.as_deref().unwrap_or_default().trim();
    PaymentTermEntry::new(term_name, coerce_days(input.days.as_ref()))
}

/// JSON numbers pass through (fractions truncate toward zero); anything else is 0.
fn coerce_days(days: Option<&serde_json::Value>) -> i64 {
    match days {
        Some(serde_json::Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// A validated payment terms write for one branch, carrying both possible
/// outcomes so the store can pick one atomically.
#[derive(Debug, Clone)]
pub struct PaymentTermsUpsert {
    pub branch_id: ObjectId,
    pub acting_user_id: String,
    /// Terms written when the branch has no record yet: defaults, then caller terms.
    pub seeded_terms: Vec<PaymentTermEntry>,
    /// Terms written over an existing record.
    pub terms: Vec<PaymentTermEntry>,
}

impl PaymentTermsUpsert {
    pub fn prepare<Tz: TimeZone>(
        branch_id: ObjectId,
        acting_user_id: &str,
        input: &[PaymentTermInput],
        now: &DateTime<Tz>,
    ) -> Result<Self, AppError> {
        if acting_user_id.trim().is_empty() {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Acting user is required"
            )));
        }
        if input.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment terms are required"
            )));
        }

        let terms: Vec<PaymentTermEntry> = input.iter().map(normalize_term).collect();
        let mut seeded_terms = default_terms(now);
        seeded_terms.extend(terms.iter().cloned());

        Ok(Self {
            branch_id,
            acting_user_id: acting_user_id.to_string(),
            seeded_terms,
            terms,
        })
    }

    /// The record to persist given what is currently stored.
    pub fn apply(
        &self,
        existing: Option<PaymentTermsRecord>,
        now: bson::DateTime,
    ) -> Upserted<PaymentTermsRecord> {
        match existing {
            None => Upserted {
                record: PaymentTermsRecord::new(
                    self.branch_id,
                    self.seeded_terms.clone(),
                    self.acting_user_id.clone(),
                    now,
                ),
                outcome: UpsertOutcome::Created,
            },
            Some(mut record) => {
                record.terms = self.terms.clone();
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn term(name: &str, days: serde_json::Value) -> PaymentTermInput {
        PaymentTermInput {
            term_name: Some(name.to_string()),
            days: Some(days),
        }
    }

    fn mid_january() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_normalize_trims_and_coerces() {
        assert_eq!(
            normalize_term(&term("  Net 30 ", json!(30))),
            PaymentTermEntry::new("Net 30", 30)
        );
        assert_eq!(normalize_term(&term("Net", json!("30"))).days, 0);
        assert_eq!(normalize_term(&term("Net", json!(null))).days, 0);
        assert_eq!(normalize_term(&term("Net", json!(12.9))).days, 12);
        assert_eq!(normalize_term(&term("Net", json!(-5))).days, -5);

        let blank = normalize_term(&PaymentTermInput::default());
        assert_eq!(blank.term_name, "");
        assert_eq!(blank.days, 0);
        assert!(blank.status);
    }

    #[test]
    fn test_default_terms_follow_date_window() {
        let defaults = default_terms(&mid_january());
        assert_eq!(
            defaults,
            vec![
                PaymentTermEntry::new(DUE_ON_RECEIPT, 0),
                PaymentTermEntry::new(DUE_END_OF_MONTH, 17),
                PaymentTermEntry::new(DUE_END_OF_NEXT_MONTH, 46),
            ]
        );
    }

    #[test]
    fn test_first_write_seeds_defaults() {
        let branch_id = ObjectId::new();
        let upsert = PaymentTermsUpsert::prepare(
            branch_id,
            "user-1",
            &[term("Net 30", json!(30))],
            &mid_january(),
        )
        .unwrap();

        let result = upsert.apply(None, bson::DateTime::now());

        assert_eq!(result.outcome, UpsertOutcome::Created);
        assert_eq!(result.record.branch_id, branch_id);
        assert_eq!(result.record.created_by_id, "user-1");
        assert_eq!(result.record.terms.len(), 4);
        assert_eq!(result.record.terms[0].term_name, DUE_ON_RECEIPT);
        assert_eq!(result.record.terms[1].term_name, DUE_END_OF_MONTH);
        assert_eq!(result.record.terms[2].term_name, DUE_END_OF_NEXT_MONTH);
        assert_eq!(result.record.terms[3], PaymentTermEntry::new("Net 30", 30));
        assert!(result.record.deleted_at.is_none());
    }

    #[test]
    fn test_later_write_replaces_terms_and_keeps_creator() {
        let branch_id = ObjectId::new();
        let created = PaymentTermsUpsert::prepare(
            branch_id,
            "creator",
            &[term("Net 30", json!(30))],
            &mid_january(),
        )
        .unwrap()
        .apply(None, bson::DateTime::now())
        .record;

        let mut existing = created.clone();
        existing.deleted_at = Some(bson::DateTime::now());
        existing.deleted_by_id = Some("admin".to_string());
        existing.deleted_by = Some("Admin".to_string());

        let result = PaymentTermsUpsert::prepare(
            branch_id,
            "someone-else",
            &[term("Net 15", json!(15)), term("Net 60", json!(60))],
            &mid_january(),
        )
        .unwrap()
        .apply(Some(existing), bson::DateTime::now());

        assert_eq!(result.outcome, UpsertOutcome::Updated);
        assert_eq!(result.record.id, created.id);
        assert_eq!(result.record.created_by_id, "creator");
        assert_eq!(
            result.record.terms,
            vec![
                PaymentTermEntry::new("Net 15", 15),
                PaymentTermEntry::new("Net 60", 60)
            ]
        );
        assert!(result.record.deleted_at.is_none());
        assert!(result.record.deleted_by_id.is_none());
        assert!(result.record.deleted_by.is_none());
    }

    #[test]
    fn test_empty_terms_rejected() {
        let result = PaymentTermsUpsert::prepare(ObjectId::new(), "user-1", &[], &mid_january());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_missing_acting_user_rejected() {
        let result = PaymentTermsUpsert::prepare(
            ObjectId::new(),
            "  ",
            &[term("Net 30", json!(30))],
            &mid_january(),
        );
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
