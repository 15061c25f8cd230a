use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reportmodel::{Report, ReportStatus, ReportTarget};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReportDto {
    pub target_type: ReportTarget,
    pub target_id: Uuid,

    #[validate(length(min = 3, max = 200, message = "Reason must be between 3 and 200 characters"))]
    pub reason: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQueryDto {
    pub status: Option<ReportStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReportStatusDto {
    #[validate(custom = "validate_review_step")]
    pub status: ReportStatus,
}

fn validate_review_step(status: &ReportStatus) -> Result<(), validator::ValidationError> {
    match status {
        ReportStatus::Open => Err(validator::ValidationError::new("invalid_report_status")),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterReportDto {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub target_type: ReportTarget,
    pub target_id: Option<Uuid>,
    pub reason: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterReportDto {
    pub fn filter_report(report: &Report) -> Self {
        let target_id = match report.target_type {
            ReportTarget::User => report.reported_user_id,
            ReportTarget::Property => report.reported_property_id,
        };

        FilterReportDto {
            id: report.id,
            reporter_id: report.reporter_id,
            target_type: report.target_type,
            target_id,
            reason: report.reason.to_owned(),
            description: report.description.clone(),
            status: report.status,
            created_at: report.created_at,
        }
    }

    pub fn filter_reports(reports: &[Report]) -> Vec<FilterReportDto> {
        reports.iter().map(FilterReportDto::filter_report).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_needs_a_reason() {
        let dto: CreateReportDto = serde_json::from_value(serde_json::json!({
            "target_type": "property",
            "target_id": "7f1c2a4e-51b0-4a39-9d2f-0f4a5b7e8c11",
            "reason": "no"
        }))
        .unwrap();
        assert_eq!(dto.target_type, ReportTarget::Property);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn reports_cannot_be_reopened() {
        assert!(UpdateReportStatusDto { status: ReportStatus::Open }.validate().is_err());
        assert!(UpdateReportStatusDto { status: ReportStatus::Resolved }.validate().is_ok());
    }

    #[test]
    fn filtered_report_exposes_the_matching_target() {
        let property_id = Uuid::new_v4();
        let report = Report {
            id: Uuid::new_v4(),
            reporter_id: Uuid::new_v4(),
            target_type: ReportTarget::Property,
            reported_user_id: None,
            reported_property_id: Some(property_id),
            reason: "Listing photos are fake".to_string(),
            description: None,
            status: ReportStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let filtered = FilterReportDto::filter_report(&report);
        assert_eq!(filtered.target_id, Some(property_id));
        assert_eq!(filtered.status, ReportStatus::Open);
    }
}
