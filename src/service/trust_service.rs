use std::sync::Arc;

use crate::{
    db::{verificationdb::VerificationExt, DBClient},
    models::{
        usermodel::User,
        verificationmodel::{UserVerification, VerificationStatus},
    },
    service::error::ServiceError,
};

const EMAIL_POINTS: i32 = 20;
const PHONE_POINTS: i32 = 20;
const DOCUMENT_SUBMITTED_POINTS: i32 = 20;
const DOCUMENT_APPROVED_POINTS: i32 = 40;
pub const MAX_TRUST_SCORE: i32 = 100;

/// Trust score from the user's verification flags and document status.
pub fn calculate_trust_score(
    email_verified: bool,
    phone_verified: bool,
    document_status: VerificationStatus,
) -> i32 {
    let mut score = 0;

    if email_verified {
        score += EMAIL_POINTS;
    }
    if phone_verified {
        score += PHONE_POINTS;
    }

    match document_status {
        VerificationStatus::Pending => score += DOCUMENT_SUBMITTED_POINTS,
        VerificationStatus::Approved => {
            score += DOCUMENT_SUBMITTED_POINTS + DOCUMENT_APPROVED_POINTS
        }
        VerificationStatus::Unsubmitted | VerificationStatus::Rejected => {}
    }

    score.min(MAX_TRUST_SCORE)
}

#[derive(Debug, Clone)]
pub struct TrustService {
    db_client: Arc<DBClient>,
}

impl TrustService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Recomputes and stores the user's trust score. Creates the verification
    /// record when the user has none yet.
    pub async fn refresh_trust_score(&self, user: &User) -> Result<UserVerification, ServiceError> {
        let verification = match self.db_client.get_verification(user.id).await? {
            Some(verification) => verification,
            None => self.db_client.create_verification(user.id, 0).await?,
        };

        let score = calculate_trust_score(
            user.email_verified,
            user.phone_verified,
            verification.status,
        );

        if score == verification.trust_score {
            return Ok(verification);
        }

        tracing::debug!(
            user_id = %user.id,
            from = verification.trust_score,
            to = score,
            "trust score changed"
        );

        Ok(self.db_client.update_trust_score(user.id, score).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_trust() {
        assert_eq!(calculate_trust_score(false, false, VerificationStatus::Unsubmitted), 0);
    }

    #[test]
    fn contact_flags_add_up() {
        assert_eq!(calculate_trust_score(true, false, VerificationStatus::Unsubmitted), 20);
        assert_eq!(calculate_trust_score(true, true, VerificationStatus::Unsubmitted), 40);
    }

    #[test]
    fn submitted_document_counts_before_review() {
        assert_eq!(calculate_trust_score(true, true, VerificationStatus::Pending), 60);
    }

    #[test]
    fn fully_verified_user_reaches_maximum() {
        assert_eq!(
            calculate_trust_score(true, true, VerificationStatus::Approved),
            MAX_TRUST_SCORE
        );
    }

    #[test]
    fn rejected_document_adds_nothing() {
        assert_eq!(calculate_trust_score(true, false, VerificationStatus::Rejected), 20);
    }
}
