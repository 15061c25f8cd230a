use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::verificationmodel::{DocumentType, UserVerification, VerificationStatus};

#[async_trait]
pub trait VerificationExt {
    async fn create_verification(
        &self,
        user_id: Uuid,
        trust_score: i32,
    ) -> Result<UserVerification, sqlx::Error>;

    async fn get_verification(&self, user_id: Uuid) -> Result<Option<UserVerification>, sqlx::Error>;

    async fn submit_document(
        &self,
        user_id: Uuid,
        document_type: DocumentType,
        document_url: String,
    ) -> Result<UserVerification, sqlx::Error>;

    async fn review_verification(
        &self,
        user_id: Uuid,
        reviewer_id: Uuid,
        status: VerificationStatus,
        notes: Option<String>,
    ) -> Result<UserVerification, sqlx::Error>;

    async fn update_trust_score(
        &self,
        user_id: Uuid,
        trust_score: i32,
    ) -> Result<UserVerification, sqlx::Error>;
}

#[async_trait]
impl VerificationExt for DBClient {
    async fn create_verification(
        &self,
        user_id: Uuid,
        trust_score: i32,
    ) -> Result<UserVerification, sqlx::Error> {
        sqlx::query_as::<_, UserVerification>(
            r#"
            INSERT INTO user_verifications (user_id, trust_score)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = user_verifications.updated_at
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(trust_score)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_verification(&self, user_id: Uuid) -> Result<Option<UserVerification>, sqlx::Error> {
        sqlx::query_as::<_, UserVerification>(
            "SELECT * FROM user_verifications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn submit_document(
        &self,
        user_id: Uuid,
        document_type: DocumentType,
        document_url: String,
    ) -> Result<UserVerification, sqlx::Error> {
        // Resubmitting clears the previous review.
        sqlx::query_as::<_, UserVerification>(
            r#"
            INSERT INTO user_verifications (user_id, document_type, document_url, status)
            VALUES ($1, $2, $3, 'pending')
            ON CONFLICT (user_id) DO UPDATE
            SET document_type = EXCLUDED.document_type,
                document_url = EXCLUDED.document_url,
                status = 'pending',
                reviewed_by = NULL,
                review_notes = NULL,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(document_type)
        .bind(document_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn review_verification(
        &self,
        user_id: Uuid,
        reviewer_id: Uuid,
        status: VerificationStatus,
        notes: Option<String>,
    ) -> Result<UserVerification, sqlx::Error> {
        sqlx::query_as::<_, UserVerification>(
            r#"
            UPDATE user_verifications
            SET status = $3, reviewed_by = $2, review_notes = $4, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(reviewer_id)
        .bind(status)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_trust_score(
        &self,
        user_id: Uuid,
        trust_score: i32,
    ) -> Result<UserVerification, sqlx::Error> {
        sqlx::query_as::<_, UserVerification>(
            r#"
            UPDATE user_verifications
            SET trust_score = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(trust_score)
        .fetch_one(&self.pool)
        .await
    }
}
