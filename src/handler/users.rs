use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{is_unique_violation, userdb::UserExt, verificationdb::VerificationExt},
    dtos::{
        userdtos::{
            FilterUserDto, LoginUserDto, RegisterUserDto, Response, UpdateProfileDto, UserData,
            UserListResponseDto, UserLoginResponseDto, UserPasswordUpdateDto, UserResponseDto,
        },
        verificationdtos::{
            ContactChannel, FilterVerificationDto, ReviewVerificationDto, SubmitVerificationDto,
            VerifyContactDto,
        },
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::{usermodel::UserRole, verificationmodel::VerificationStatus},
    service::trust_service::calculate_trust_score,
    utils::{password, token},
    AppState,
};

/// Routes reachable without a token.
pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_users).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route("/me", get(get_me).put(update_profile))
        .route("/password", put(update_user_password))
        .route(
            "/verification",
            get(get_verification).post(submit_verification),
        )
        .route("/verify-contact", put(verify_contact))
        .route(
            "/verification/:user_id/review",
            put(review_verification).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

fn auth_cookie(token: String, max_age_minutes: i64) -> Result<HeaderMap, HttpError> {
    let cookie = Cookie::build(("token", token))
        .path("/")
        .max_age(time::Duration::minutes(max_age_minutes))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build auth cookie"))?,
    );
    Ok(headers)
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing_user = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Err(HttpError::unique_constraint_violation(
            ErrorMessage::EmailExist.to_string(),
        ));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.name,
            body.email.to_lowercase(),
            body.phone,
            hashed_password,
            body.role.unwrap_or(UserRole::User),
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HttpError::unique_constraint_violation(ErrorMessage::EmailExist.to_string())
            } else {
                HttpError::server_error(e.to_string())
            }
        })?;

    app_state
        .db_client
        .create_verification(
            user.id,
            calculate_trust_score(false, false, VerificationStatus::Unsubmitted),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state.notification_service.notify_welcome(&user).await;

    tracing::info!(user_id = %user.id, role = user.role.to_str(), "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponseDto {
            status: "success".to_string(),
            data: UserData {
                user: FilterUserDto::filter_user(&user),
            },
        }),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()));
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let headers = auth_cookie(token.clone(), app_state.env.jwt_maxage)?;

    let mut response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let headers = auth_cookie(String::new(), -1)?;

    let mut response = Json(Response {
        status: "success",
        message: "Logged out".to_string(),
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn get_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state
        .db_client
        .get_verification(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": FilterUserDto::filter_user(&user.user),
            "verification": verification.as_ref().map(FilterVerificationDto::filter_verification),
        }
    })))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        results: users.len(),
        users: FilterUserDto::filter_users(&users),
    }))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let current = &user.user;
    let name = body.name.unwrap_or_else(|| current.name.clone());

    // A new phone number has to be verified again.
    let (phone, phone_verified) = match body.phone {
        Some(phone) if Some(&phone) != current.phone.as_ref() => (Some(phone), false),
        _ => (current.phone.clone(), current.phone_verified),
    };

    let updated = app_state
        .db_client
        .update_user_profile(current.id, name, phone, phone_verified)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if updated.phone_verified != current.phone_verified {
        app_state.trust_service.refresh_trust_score(&updated).await?;
    }

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&updated),
        },
    }))
}

pub async fn update_user_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UserPasswordUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let password_match = password::compare(&body.old_password, &user.user.password)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if !password_match {
        return Err(HttpError::bad_request("Old password is incorrect"));
    }

    let hash_password =
        password::hash(&body.new_password).map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(user.user.id, hash_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        message: "Password updated Successfully".to_string(),
        status: "success",
    }))
}

pub async fn get_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let verification = app_state
        .trust_service
        .refresh_trust_score(&user.user)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "verification": FilterVerificationDto::filter_verification(&verification)
        }
    })))
}

pub async fn submit_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubmitVerificationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if user.user.identity_verified {
        return Err(HttpError::bad_request("Your identity is already verified"));
    }

    app_state
        .db_client
        .submit_document(user.user.id, body.document_type, body.document_url)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let verification = app_state
        .trust_service
        .refresh_trust_score(&user.user)
        .await?;

    tracing::info!(user_id = %user.user.id, "identity document submitted");

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Document submitted for review",
        "data": {
            "verification": FilterVerificationDto::filter_verification(&verification)
        }
    })))
}

pub async fn verify_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<VerifyContactDto>,
) -> Result<impl IntoResponse, HttpError> {
    let current = &user.user;

    let (email_verified, phone_verified) = match body.channel {
        ContactChannel::Email => (true, current.phone_verified),
        ContactChannel::Phone => {
            if current.phone.is_none() {
                return Err(HttpError::bad_request("Add a phone number before verifying it"));
            }
            (current.email_verified, true)
        }
    };

    let updated = app_state
        .db_client
        .update_verification_flags(
            current.id,
            email_verified,
            phone_verified,
            current.identity_verified,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let verification = app_state.trust_service.refresh_trust_score(&updated).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": FilterUserDto::filter_user(&updated),
            "verification": FilterVerificationDto::filter_verification(&verification)
        }
    })))
}

pub async fn review_verification(
    Path(user_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(reviewer): Extension<JWTAuthMiddeware>,
    Json(body): Json<ReviewVerificationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let target = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let verification = app_state
        .db_client
        .get_verification(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User has not submitted a document"))?;

    if verification.status != VerificationStatus::Pending {
        return Err(HttpError::bad_request("Verification is not awaiting review"));
    }

    app_state
        .db_client
        .review_verification(user_id, reviewer.user.id, body.status, body.notes)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let target = app_state
        .db_client
        .update_verification_flags(
            target.id,
            target.email_verified,
            target.phone_verified,
            body.status == VerificationStatus::Approved,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let verification = app_state.trust_service.refresh_trust_score(&target).await?;

    tracing::info!(
        user_id = %target.id,
        reviewer_id = %reviewer.user.id,
        status = verification.status.to_str(),
        "identity verification reviewed"
    );

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": FilterUserDto::filter_user(&target),
            "verification": FilterVerificationDto::filter_verification(&verification)
        }
    })))
}
