use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, reportdb::ReportExt, userdb::UserExt},
    dtos::reportdtos::{CreateReportDto, FilterReportDto, ReportQueryDto, UpdateReportStatusDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{reportmodel::ReportTarget, usermodel::UserRole},
    AppState,
};

pub fn report_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_reports)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                }))
                .post(create_report),
        )
        .route("/mine", get(get_my_reports))
        .route(
            "/:report_id/status",
            put(update_report_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_report(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReportDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    match body.target_type {
        ReportTarget::User => {
            if body.target_id == user.user.id {
                return Err(HttpError::bad_request("You cannot report yourself"));
            }

            app_state
                .db_client
                .get_user(Some(body.target_id), None)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or_else(|| HttpError::not_found("Reported user not found"))?;
        }
        ReportTarget::Property => {
            let property = app_state
                .db_client
                .get_property_by_id(body.target_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or_else(|| HttpError::not_found("Reported property not found"))?;

            if property.is_owned_by(user.user.id) {
                return Err(HttpError::bad_request("You cannot report your own property"));
            }
        }
    }

    let report = app_state
        .db_client
        .create_report(
            user.user.id,
            body.target_type,
            body.target_id,
            body.reason,
            body.description,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(report_id = %report.id, target = ?report.target_type, "report filed");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "report": FilterReportDto::filter_report(&report)
            }
        })),
    ))
}

pub async fn get_my_reports(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let reports = app_state
        .db_client
        .get_reports_by_reporter(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reports.len(),
        "data": {
            "reports": FilterReportDto::filter_reports(&reports)
        }
    })))
}

pub async fn get_reports(
    Query(query): Query<ReportQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reports = app_state
        .db_client
        .get_reports(query.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reports.len(),
        "data": {
            "reports": FilterReportDto::filter_reports(&reports)
        }
    })))
}

pub async fn update_report_status(
    Path(report_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateReportStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_report_by_id(report_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Report not found"))?;

    let report = app_state
        .db_client
        .update_report_status(report_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(report_id = %report.id, status = ?report.status, "report status updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "report": FilterReportDto::filter_report(&report)
        }
    })))
}
