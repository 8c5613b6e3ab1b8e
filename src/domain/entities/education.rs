use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pre-seeded reference data. Nothing in this service writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EducationRecord {
    pub id: Uuid,
    pub degree: String,
    pub institution: String,
    pub year: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EducationListResponse {
    pub success: bool,
    pub data: Vec<EducationRecord>,
}
