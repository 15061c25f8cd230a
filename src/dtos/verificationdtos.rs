use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::verificationmodel::{DocumentType, UserVerification, VerificationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitVerificationDto {
    pub document_type: DocumentType,

    #[validate(url(message = "Document must be a valid URL"))]
    pub document_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewVerificationDto {
    #[validate(custom = "validate_review_status")]
    pub status: VerificationStatus,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

fn validate_review_status(status: &VerificationStatus) -> Result<(), validator::ValidationError> {
    match status {
        VerificationStatus::Approved | VerificationStatus::Rejected => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_review_status")),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Email,
    Phone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyContactDto {
    pub channel: ContactChannel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterVerificationDto {
    pub status: String,
    pub trust_score: i32,
    pub document_type: Option<String>,
    pub review_notes: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterVerificationDto {
    pub fn filter_verification(verification: &UserVerification) -> Self {
        FilterVerificationDto {
            status: verification.status.to_str().to_string(),
            trust_score: verification.trust_score,
            document_type: verification
                .document_type
                .map(|document_type| document_type.to_str().to_string()),
            review_notes: verification.review_notes.clone(),
            updated_at: verification.updated_at,
        }
    }
}
