use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    NationalId,
    Passport,
    DriverLicense,
}

impl DocumentType {
    pub fn to_str(&self) -> &str {
        match self {
            DocumentType::NationalId => "national_id",
            DocumentType::Passport => "passport",
            DocumentType::DriverLicense => "driver_license",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unsubmitted,
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            VerificationStatus::Unsubmitted => "unsubmitted",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// Identity verification state of a user. Exactly one row per user.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct UserVerification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_type: Option<DocumentType>,
    pub document_url: Option<String>,
    pub status: VerificationStatus,
    pub trust_score: i32,
    pub reviewed_by: Option<Uuid>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
