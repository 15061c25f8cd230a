use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{rentaldb::RentalExt, userdb::UserExt},
    dtos::{
        paymentdtos::FilterPaymentDto,
        rentaldtos::{CreateRentalDto, FilterRentalDto, PayRentDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{propertymodel::Property, rentalmodel::Rental},
    service::rental_service::can_view_rental,
    AppState,
};

pub fn rental_handler() -> Router {
    Router::new()
        .route("/", post(create_rental))
        .route("/mine", get(get_my_rentals))
        .route("/owner", get(get_owner_rentals))
        .route("/:rental_id", get(get_rental))
        .route("/:rental_id/approve", put(approve_rental))
        .route("/:rental_id/complete", put(complete_rental))
        .route("/:rental_id/cancel", put(cancel_rental))
        .route("/:rental_id/pay", post(pay_rent))
}

/// Tells the tenant their rental changed state.
async fn notify_tenant(app_state: &AppState, property: &Property, rental: &Rental) {
    match app_state.db_client.get_user(Some(rental.tenant_id), None).await {
        Ok(Some(tenant)) => {
            app_state
                .notification_service
                .notify_rental_status(&tenant, property, rental)
                .await
        }
        Ok(None) => tracing::warn!(rental_id = %rental.id, "tenant no longer exists"),
        Err(e) => tracing::warn!(rental_id = %rental.id, "failed to load tenant: {}", e),
    }
}

pub async fn create_rental(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateRentalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (rental, created) = app_state
        .rental_service
        .create_or_get_rental(&user.user, &body)
        .await?;

    if created {
        let (_, property) = app_state
            .rental_service
            .get_rental_with_property(rental.id)
            .await?;

        match app_state.db_client.get_user(Some(property.owner_id), None).await {
            Ok(Some(owner)) => {
                app_state
                    .notification_service
                    .notify_rental_requested(&owner, &property, &rental)
                    .await
            }
            Ok(None) => tracing::warn!(property_id = %property.id, "owner no longer exists"),
            Err(e) => tracing::warn!(property_id = %property.id, "failed to load owner: {}", e),
        }
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "rental": FilterRentalDto::filter_rental(&rental)
            }
        })),
    ))
}

pub async fn get_my_rentals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rentals = app_state
        .db_client
        .get_rentals_by_tenant(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": rentals.len(),
        "data": {
            "rentals": FilterRentalDto::filter_rentals(&rentals)
        }
    })))
}

pub async fn get_owner_rentals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rentals = app_state
        .db_client
        .get_rentals_by_owner(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": rentals.len(),
        "data": {
            "rentals": FilterRentalDto::filter_rentals(&rentals)
        }
    })))
}

pub async fn get_rental(
    Path(rental_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let (rental, property) = app_state
        .rental_service
        .get_rental_with_property(rental_id)
        .await?;

    if !can_view_rental(&rental, &property, &user.user) {
        return Err(HttpError::forbidden("You are not a party to this rental"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "rental": FilterRentalDto::filter_rental(&rental)
        }
    })))
}

pub async fn approve_rental(
    Path(rental_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rental = app_state
        .rental_service
        .approve_rental(&user.user, rental_id)
        .await?;

    let (_, property) = app_state
        .rental_service
        .get_rental_with_property(rental.id)
        .await?;
    notify_tenant(&app_state, &property, &rental).await;

    tracing::info!(rental_id = %rental.id, "rental approved");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "rental": FilterRentalDto::filter_rental(&rental)
        }
    })))
}

pub async fn complete_rental(
    Path(rental_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rental = app_state
        .rental_service
        .complete_rental(&user.user, rental_id)
        .await?;

    let (_, property) = app_state
        .rental_service
        .get_rental_with_property(rental.id)
        .await?;
    notify_tenant(&app_state, &property, &rental).await;

    tracing::info!(rental_id = %rental.id, "rental completed");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "rental": FilterRentalDto::filter_rental(&rental)
        }
    })))
}

pub async fn cancel_rental(
    Path(rental_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let rental = app_state
        .rental_service
        .cancel_rental(&user.user, rental_id)
        .await?;

    if rental.tenant_id != user.user.id {
        let (_, property) = app_state
            .rental_service
            .get_rental_with_property(rental.id)
            .await?;
        notify_tenant(&app_state, &property, &rental).await;
    }

    tracing::info!(rental_id = %rental.id, cancelled_by = %user.user.id, "rental cancelled");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "rental": FilterRentalDto::filter_rental(&rental)
        }
    })))
}

pub async fn pay_rent(
    Path(rental_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<PayRentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (rental, payment) = app_state
        .rental_service
        .pay_for_month(&user.user, rental_id, &body.month, body.method)
        .await?;

    app_state
        .notification_service
        .notify_payment_received(&user.user, &payment)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "rental": FilterRentalDto::filter_rental(&rental),
                "payment": FilterPaymentDto::filter_payment(&payment)
            }
        })),
    ))
}
