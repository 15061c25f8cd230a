use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "report_target", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    User,
    Property,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Reviewing,
    Resolved,
    Dismissed,
}

/// A complaint filed against a user or a listing.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub target_type: ReportTarget,
    pub reported_user_id: Option<Uuid>,
    pub reported_property_id: Option<Uuid>,
    pub reason: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
