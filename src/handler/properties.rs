use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    handler::Handler,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{propertydb::PropertyExt, rentaldb::RentalExt, userdb::UserExt},
    dtos::propertydtos::{
        CreatePropertyDto, FilterPropertyDto, PropertyQueryDto, UpdatePropertyDto,
    },
    error::HttpError,
    middleware::{auth, JWTAuthMiddeware},
    models::{propertymodel::Property, usermodel::UserRole},
    AppState,
};

/// Listing reads are public; every write needs a token.
pub fn property_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_properties).post(create_property.layer(middleware::from_fn(auth))),
        )
        .route("/mine", get(get_my_properties).layer(middleware::from_fn(auth)))
        .route(
            "/:property_id",
            get(get_property)
                .put(update_property.layer(middleware::from_fn(auth)))
                .delete(delete_property.layer(middleware::from_fn(auth))),
        )
}

async fn load_live_property(app_state: &AppState, property_id: Uuid) -> Result<Property, HttpError> {
    app_state
        .db_client
        .get_property_by_id(property_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|property| !property.is_deleted)
        .ok_or_else(|| HttpError::not_found("Property not found"))
}

async fn load_owned_property(
    app_state: &AppState,
    property_id: Uuid,
    owner_id: Uuid,
) -> Result<Property, HttpError> {
    let property = load_live_property(app_state, property_id).await?;

    if !property.is_owned_by(owner_id) {
        return Err(HttpError::forbidden("Only the owner can manage this property"));
    }

    Ok(property)
}

pub async fn get_properties(
    Query(query): Query<PropertyQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let properties = app_state
        .db_client
        .get_available_properties(&query)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": properties.len(),
        "data": {
            "properties": FilterPropertyDto::filter_properties(&properties)
        }
    })))
}

pub async fn get_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = load_live_property(&app_state, property_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "property": FilterPropertyDto::filter_property(&property)
        }
    })))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = app_state
        .db_client
        .create_property(user.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if user.user.role == UserRole::User {
        app_state
            .db_client
            .update_user_role(user.user.id, UserRole::Landlord)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        tracing::info!(user_id = %user.user.id, "user promoted to landlord");
    }

    tracing::info!(property_id = %property.id, owner_id = %user.user.id, "property listed");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "property": FilterPropertyDto::filter_property(&property)
            }
        })),
    ))
}

pub async fn get_my_properties(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let properties = app_state
        .db_client
        .get_properties_by_owner(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": properties.len(),
        "data": {
            "properties": FilterPropertyDto::filter_properties(&properties)
        }
    })))
}

pub async fn update_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdatePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let property = load_owned_property(&app_state, property_id, user.user.id).await?;

    if body.is_available == Some(true) {
        let rented = app_state
            .db_client
            .has_active_rental(property.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if rented {
            return Err(HttpError::bad_request(
                "A property with an active rental cannot be listed as available",
            ));
        }
    }

    let property = app_state
        .db_client
        .update_property(property.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "property": FilterPropertyDto::filter_property(&property)
        }
    })))
}

pub async fn delete_property(
    Path(property_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let property = load_owned_property(&app_state, property_id, user.user.id).await?;

    let rented = app_state
        .db_client
        .has_active_rental(property.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if rented {
        return Err(HttpError::bad_request(
            "A property with an active rental cannot be deleted",
        ));
    }

    app_state
        .db_client
        .soft_delete_property(property.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(property_id = %property.id, "property deleted");

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Property deleted"
    })))
}
