use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::reportmodel::{Report, ReportStatus, ReportTarget};

#[async_trait]
pub trait ReportExt {
    async fn create_report(
        &self,
        reporter_id: Uuid,
        target_type: ReportTarget,
        target_id: Uuid,
        reason: String,
        description: Option<String>,
    ) -> Result<Report, sqlx::Error>;

    async fn get_report_by_id(&self, report_id: Uuid) -> Result<Option<Report>, sqlx::Error>;

    async fn get_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, sqlx::Error>;

    async fn get_reports_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>, sqlx::Error>;

    async fn update_report_status(
        &self,
        report_id: Uuid,
        status: ReportStatus,
    ) -> Result<Report, sqlx::Error>;
}

#[async_trait]
impl ReportExt for DBClient {
    async fn create_report(
        &self,
        reporter_id: Uuid,
        target_type: ReportTarget,
        target_id: Uuid,
        reason: String,
        description: Option<String>,
    ) -> Result<Report, sqlx::Error> {
        let (reported_user_id, reported_property_id) = match target_type {
            ReportTarget::User => (Some(target_id), None),
            ReportTarget::Property => (None, Some(target_id)),
        };

        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (reporter_id, target_type, reported_user_id, reported_property_id, reason, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(reporter_id)
        .bind(target_type)
        .bind(reported_user_id)
        .bind(reported_property_id)
        .bind(reason)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_report_by_id(&self, report_id: Uuid) -> Result<Option<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1")
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT * FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reports_by_reporter(&self, reporter_id: Uuid) -> Result<Vec<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            "SELECT * FROM reports WHERE reporter_id = $1 ORDER BY created_at DESC",
        )
        .bind(reporter_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_report_status(
        &self,
        report_id: Uuid,
        status: ReportStatus,
    ) -> Result<Report, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            "UPDATE reports SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(report_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
