use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModeEntry {
    pub payment_mode: String,
}

/// Payment modes accepted by a single branch. Stored in `payment_modes`,
/// unique on `branchId`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModesRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub branch_id: ObjectId,
    #[serde(default)]
    pub payment_modes: Vec<PaymentModeEntry>,
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

impl PaymentModesRecord {
    pub fn new(
        branch_id: ObjectId,
        payment_modes: Vec<PaymentModeEntry>,
        created_by_id: String,
        now: DateTime,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            branch_id,
            payment_modes,
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
