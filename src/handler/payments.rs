use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        paymentdb::{NewPayment, PaymentExt},
        propertydb::PropertyExt,
        rentaldb::RentalExt,
    },
    dtos::{
        paymentdtos::{CreatePaymentDto, FilterPaymentDto, UpdatePaymentStatusDto},
        rentaldtos::FilterRentalDto,
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::{paymentmodel::PaymentStatus, usermodel::UserRole},
    utils::reference::generate_payment_reference,
    AppState,
};

pub fn payment_handler() -> Router {
    Router::new()
        .route("/", post(create_payment))
        .route("/mine", get(get_my_payments))
        .route("/:payment_id", get(get_payment))
        .route(
            "/:payment_id/status",
            put(update_payment_status).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn create_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut property_id = body.property_id;

    if let Some(rental_id) = body.rental_id {
        let rental = app_state
            .db_client
            .get_rental_by_id(rental_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Rental not found"))?;

        if rental.tenant_id != user.user.id {
            return Err(HttpError::forbidden("This rental does not belong to you"));
        }

        match property_id {
            Some(id) if id != rental.property_id => {
                return Err(HttpError::bad_request(
                    "The property does not match the rental",
                ));
            }
            _ => property_id = Some(rental.property_id),
        }
    }

    if let Some(id) = property_id {
        app_state
            .db_client
            .get_property_by_id(id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Property not found"))?;
    }

    let payment = app_state
        .db_client
        .create_payment(NewPayment {
            payer_id: user.user.id,
            amount: body.amount,
            method: body.method,
            status: PaymentStatus::Pending,
            property_id,
            rental_id: body.rental_id,
            reference: generate_payment_reference(),
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        payment_id = %payment.id,
        reference = %payment.reference,
        amount = payment.amount,
        "payment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "payment": FilterPaymentDto::filter_payment(&payment)
            }
        })),
    ))
}

pub async fn get_my_payments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let payments = app_state
        .db_client
        .get_payments_by_payer(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": payments.len(),
        "data": {
            "payments": FilterPaymentDto::filter_payments(&payments)
        }
    })))
}

pub async fn get_payment(
    Path(payment_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment_by_id(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    if payment.payer_id != user.user.id && !user.user.is_admin() {
        return Err(HttpError::forbidden("You cannot view this payment"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "payment": FilterPaymentDto::filter_payment(&payment)
        }
    })))
}

pub async fn update_payment_status(
    Path(payment_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdatePaymentStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_payment_by_id(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    // Rent payments settle a schedule entry, which must reopen with them.
    if existing.period.is_some() {
        let (payment, rental) = app_state
            .rental_service
            .reverse_rent_payment(existing.id, body.status)
            .await?;

        return Ok(Json(serde_json::json!({
            "status": "success",
            "data": {
                "payment": FilterPaymentDto::filter_payment(&payment),
                "rental": FilterRentalDto::filter_rental(&rental)
            }
        })));
    }

    let payment = app_state
        .db_client
        .update_payment_status(payment_id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(payment_id = %payment.id, status = ?payment.status, "payment status updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "payment": FilterPaymentDto::filter_payment(&payment)
        }
    })))
}
