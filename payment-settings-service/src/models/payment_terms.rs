use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermEntry {
    pub term_name: String,
    #[serde(default)]
    pub days: i64,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

impl PaymentTermEntry {
    pub fn new(term_name: impl Into<String>, days: i64) -> Self {
        Self {
            term_name: term_name.into(),
            days,
            status: true,
        }
    }
}

/// Payment terms configured for a single branch. Stored in `payment_terms`,
/// unique on `branchId`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermsRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub branch_id: ObjectId,
    #[serde(default)]
    pub terms: Vec<PaymentTermEntry>,
    pub created_by_id: String,
    #[serde(default)]
    pub deleted_at: Option<DateTime>,
    #[serde(default)]
    pub deleted_by_id: Option<String>,
    #[serde(default)]
    pub deleted_by: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl PaymentTermsRecord {
    pub fn new(
        branch_id: ObjectId,
        terms: Vec<PaymentTermEntry>,
        created_by_id: String,
        now: DateTime,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            branch_id,
            terms,
            created_by_id,
            deleted_at: None,
            deleted_by_id: None,
            deleted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn clear_soft_delete(&mut self) {
        self.deleted_at = None;
        self.deleted_by_id = None;
        self.deleted_by = None;
    }
}
