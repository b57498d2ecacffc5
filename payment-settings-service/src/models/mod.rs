pub mod payment_modes;
pub mod payment_terms;

pub use payment_modes::{PaymentModeEntry, PaymentModesRecord};
pub use payment_terms::{PaymentTermEntry, PaymentTermsRecord};

/// Whether an upsert inserted a new branch record or updated the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => "created",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// A record as it stands after an upsert, with how it got there.
#[derive(Debug, Clone)]
pub struct Upserted<T> {
    pub record: T,
    pub outcome: UpsertOutcome,
}
