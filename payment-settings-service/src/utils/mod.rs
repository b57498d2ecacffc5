use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Parse a branch id from a path segment. Branch ids are MongoDB ObjectIds.
pub fn parse_branch_id(raw: &str) -> Result<ObjectId, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Branch id is required")));
    }

    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid branch id: {}", raw)))
}
