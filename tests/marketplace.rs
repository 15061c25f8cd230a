//! End-to-end flows against a real Postgres. Run with
//! `DATABASE_URL=... cargo test -- --ignored`.
mod common;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use common::{app_with_pool, send};
use rentnest::{
    db::{userdb::UserExt, DBClient},
    models::usermodel::UserRole,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

struct Session {
    id: Uuid,
    token: String,
}

async fn sign_up(app: &Router, name: &str, email: &str) -> Session {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "passwordConfirm": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let id = body["data"]["user"]["id"].as_str().unwrap().parse().unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    Session {
        id,
        token: body["token"].as_str().unwrap().to_string(),
    }
}

fn listing() -> Value {
    json!({
        "title": "Sunny two bedroom flat",
        "description": "Quiet street, ten minutes from the station.",
        "property_type": "apartment",
        "address": "12 Harbour Road",
        "city": "Lagos",
        "state": "Lagos",
        "country": "Nigeria",
        "bedrooms": 2,
        "bathrooms": 1,
        "monthly_rent": 150000,
        "amenities": ["wifi", "parking"],
        "images": ["https://img.example.com/1.jpg"]
    })
}

async fn list_property(app: &Router, owner: &Session) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/properties",
        Some(&owner.token),
        Some(listing()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["property"]["id"].as_str().unwrap().to_string()
}

async fn request_rental(
    app: &Router,
    tenant: &Session,
    property_id: &str,
    start: &str,
    end: &str,
) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/rentals",
        Some(&tenant.token),
        Some(json!({ "property_id": property_id, "start_date": start, "end_date": end })),
    )
    .await
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn created_property_keeps_every_field(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/properties/{}", property_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let property = &body["data"]["property"];
    let submitted = listing();
    for field in [
        "title",
        "description",
        "property_type",
        "address",
        "city",
        "state",
        "country",
        "bedrooms",
        "bathrooms",
        "monthly_rent",
        "amenities",
        "images",
    ] {
        assert_eq!(property[field], submitted[field], "field {}", field);
    }
    assert_eq!(property["owner_id"], owner.id.to_string());
    assert_eq!(property["is_available"], true);

    let (_, me) = send(&app, Method::GET, "/api/users/me", Some(&owner.token), None).await;
    assert_eq!(me["data"]["user"]["role"], "landlord");
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn only_the_owner_can_change_a_property(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let stranger = sign_up(&app, "Eve", "eve@example.com").await;
    let property_id = list_property(&app, &owner).await;
    let uri = format!("/api/properties/{}", property_id);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&stranger.token),
        Some(json!({ "monthly_rent": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&stranger.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&owner.token),
        Some(json!({ "monthly_rent": 175000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["property"]["monthly_rent"], 175000);
    assert_eq!(body["data"]["property"]["title"], "Sunny two bedroom flat");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn requesting_a_rental_twice_returns_the_same_rental(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (status, first) =
        request_rental(&app, &tenant, &property_id, "2025-01-31", "2025-05-31").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) =
        request_rental(&app, &tenant, &property_id, "2025-01-31", "2025-05-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["rental"]["id"], second["data"]["rental"]["id"]);

    let (_, mine) = send(&app, Method::GET, "/api/rentals/mine", Some(&tenant.token), None).await;
    assert_eq!(mine["results"], 1);

    let due_dates: Vec<&str> = first["data"]["rental"]["payment_schedule"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["due_date"].as_str().unwrap())
        .collect();
    assert_eq!(
        due_dates,
        ["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"]
    );
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn paying_a_month_marks_only_that_entry(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (_, body) = request_rental(&app, &tenant, &property_id, "2025-01-01", "2025-04-01").await;
    let rental_id = body["data"]["rental"]["id"].as_str().unwrap().to_string();
    let pay_uri = format!("/api/rentals/{}/pay", rental_id);

    let (status, body) = send(
        &app,
        Method::POST,
        &pay_uri,
        Some(&tenant.token),
        Some(json!({ "month": "2025-02", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let rental = &body["data"]["rental"];
    let statuses: Vec<&str> = rental["payment_schedule"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["unpaid", "paid", "unpaid"]);
    assert_eq!(rental["payment_status"], "partial");
    assert_eq!(body["data"]["payment"]["status"], "completed");
    assert_eq!(body["data"]["payment"]["amount"], 150000);

    let (status, _) = send(
        &app,
        Method::POST,
        &pay_uri,
        Some(&tenant.token),
        Some(json!({ "month": "2025-02", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        &pay_uri,
        Some(&tenant.token),
        Some(json!({ "month": "2026-02", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, property) = send(
        &app,
        Method::GET,
        &format!("/api/properties/{}", property_id),
        None,
        None,
    )
    .await;
    assert_eq!(property["data"]["property"]["is_available"], false);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn fully_paid_rental_cannot_be_cancelled(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (_, body) = request_rental(&app, &tenant, &property_id, "2025-01-01", "2025-02-01").await;
    let rental_id = body["data"]["rental"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/rentals/{}/approve", rental_id),
        Some(&owner.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/api/rentals/{}/pay", rental_id),
        Some(&tenant.token),
        Some(json!({ "month": "2025-01", "method": "bank_transfer" })),
    )
    .await;
    assert_eq!(body["data"]["rental"]["payment_status"], "paid");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/rentals/{}/cancel", rental_id),
        Some(&tenant.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("can no longer be cancelled"));
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn outsiders_cannot_see_a_rental(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let stranger = sign_up(&app, "Eve", "eve@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (_, body) = request_rental(&app, &tenant, &property_id, "2025-01-01", "2025-03-01").await;
    let uri = format!("/api/rentals/{}", body["data"]["rental"]["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(&stranger.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, &uri, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let app = app_with_pool(pool);
    sign_up(&app, "Olu", "olu@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "name": "Other Olu",
            "email": "OLU@example.com",
            "password": "password123",
            "passwordConfirm": "password123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn identity_review_raises_trust_score(pool: PgPool) {
    let app = app_with_pool(pool.clone());
    let user = sign_up(&app, "Tayo", "tayo@example.com").await;
    let admin = sign_up(&app, "Root", "root@example.com").await;
    DBClient::new(pool)
        .update_user_role(admin.id, UserRole::Admin)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/verify-contact",
        Some(&user.token),
        Some(json!({ "channel": "email" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verification"]["trust_score"], 20);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/verification",
        Some(&user.token),
        Some(json!({
            "document_type": "passport",
            "document_url": "https://files.example.com/passport.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verification"]["status"], "pending");
    assert_eq!(body["data"]["verification"]["trust_score"], 40);

    let review_uri = format!("/api/users/verification/{}/review", user.id);
    let (status, _) = send(
        &app,
        Method::PUT,
        &review_uri,
        Some(&user.token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PUT,
        &review_uri,
        Some(&admin.token),
        Some(json!({ "status": "approved", "notes": "matches" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["user"]["identity_verified"], true);
    assert_eq!(body["data"]["verification"]["trust_score"], 80);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn users_cannot_report_themselves(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reports",
        Some(&tenant.token),
        Some(json!({ "target_type": "user", "target_id": tenant.id, "reason": "testing" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/reports",
        Some(&owner.token),
        Some(json!({ "target_type": "property", "target_id": property_id, "reason": "testing" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reports",
        Some(&tenant.token),
        Some(json!({
            "target_type": "property",
            "target_id": property_id,
            "reason": "Photos do not match the flat"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["report"]["status"], "open");
    assert_eq!(body["data"]["report"]["target_id"], property_id);
}

async fn open_rental(app: &Router, tenant: &Session, property_id: &str) -> String {
    let (status, body) = request_rental(app, tenant, property_id, "2025-01-01", "2025-04-01").await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["rental"]["id"].as_str().unwrap().to_string()
}

async fn transition(app: &Router, actor: &Session, rental_id: &str, action: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::PUT,
        &format!("/api/rentals/{}/{}", rental_id, action),
        Some(&actor.token),
        None,
    )
    .await
}

async fn is_available(app: &Router, property_id: &str) -> Value {
    let (_, body) = send(
        app,
        Method::GET,
        &format!("/api/properties/{}", property_id),
        None,
        None,
    )
    .await;
    body["data"]["property"]["is_available"].clone()
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn approval_takes_the_listing_off_until_completion(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;
    let rental_id = open_rental(&app, &tenant, &property_id).await;

    let (status, _) = transition(&app, &tenant, &rental_id, "approve").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = transition(&app, &owner, &rental_id, "approve").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["rental"]["status"], "active");
    assert_eq!(is_available(&app, &property_id).await, false);

    let (status, body) = transition(&app, &owner, &rental_id, "complete").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["rental"]["status"], "completed");
    assert_eq!(is_available(&app, &property_id).await, true);

    let (status, _) = transition(&app, &owner, &rental_id, "cancel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn owner_can_cancel_an_active_rental(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;
    let rental_id = open_rental(&app, &tenant, &property_id).await;

    transition(&app, &owner, &rental_id, "approve").await;

    let (status, body) = transition(&app, &owner, &rental_id, "cancel").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["rental"]["status"], "cancelled");
    assert_eq!(is_available(&app, &property_id).await, true);

    let (status, _) = transition(&app, &tenant, &rental_id, "cancel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/rentals/{}/pay", rental_id),
        Some(&tenant.token),
        Some(json!({ "month": "2025-01", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn only_the_tenant_can_pay_rent(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;
    let rental_id = open_rental(&app, &tenant, &property_id).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/rentals/{}/pay", rental_id),
        Some(&owner.token),
        Some(json!({ "month": "2025-01", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn some_listings_cannot_be_rented(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;

    let own = list_property(&app, &owner).await;
    let (status, _) = request_rental(&app, &owner, &own, "2025-01-01", "2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unlisted = list_property(&app, &owner).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{}", unlisted),
        Some(&owner.token),
        Some(json!({ "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request_rental(&app, &tenant, &unlisted, "2025-01-01", "2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let deleted = list_property(&app, &owner).await;
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/properties/{}", deleted),
        Some(&owner.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request_rental(&app, &tenant, &deleted, "2025-01-01", "2025-04-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn rented_property_cannot_be_deleted(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let property_id = list_property(&app, &owner).await;
    let rental_id = open_rental(&app, &tenant, &property_id).await;
    transition(&app, &owner, &rental_id, "approve").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/properties/{}", property_id),
        Some(&owner.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn a_property_has_one_active_tenant(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let first = sign_up(&app, "Tayo", "tayo@example.com").await;
    let second = sign_up(&app, "Bisi", "bisi@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let first_rental = open_rental(&app, &first, &property_id).await;
    let second_rental = open_rental(&app, &second, &property_id).await;

    let (status, _) = transition(&app, &owner, &first_rental, "approve").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = transition(&app, &owner, &second_rental, "approve").await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let (_, body) = send(&app, Method::GET, "/api/rentals/owner", Some(&owner.token), None).await;
    let active = body["data"]["rentals"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|rental| rental["status"] == "active")
        .count();
    assert_eq!(active, 1);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn withdrawn_request_does_not_relist_a_rented_property(pool: PgPool) {
    let app = app_with_pool(pool);
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let first = sign_up(&app, "Tayo", "tayo@example.com").await;
    let second = sign_up(&app, "Bisi", "bisi@example.com").await;
    let property_id = list_property(&app, &owner).await;

    let first_rental = open_rental(&app, &first, &property_id).await;
    let second_rental = open_rental(&app, &second, &property_id).await;
    transition(&app, &owner, &first_rental, "approve").await;

    let (status, _) = transition(&app, &second, &second_rental, "cancel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(is_available(&app, &property_id).await, false);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{}", property_id),
        Some(&owner.token),
        Some(json!({ "is_available": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(is_available(&app, &property_id).await, false);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn refunding_rent_reopens_the_month(pool: PgPool) {
    let app = app_with_pool(pool.clone());
    let owner = sign_up(&app, "Olu", "olu@example.com").await;
    let tenant = sign_up(&app, "Tayo", "tayo@example.com").await;
    let admin = sign_up(&app, "Root", "root@example.com").await;
    DBClient::new(pool)
        .update_user_role(admin.id, UserRole::Admin)
        .await
        .unwrap();

    let property_id = list_property(&app, &owner).await;
    let rental_id = open_rental(&app, &tenant, &property_id).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/rentals/{}/pay", rental_id),
        Some(&tenant.token),
        Some(json!({ "month": "2025-01", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let status_uri = format!(
        "/api/payments/{}/status",
        body["data"]["payment"]["id"].as_str().unwrap()
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        &status_uri,
        Some(&admin.token),
        Some(json!({ "status": "refunded" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["payment"]["status"], "refunded");

    let rental = &body["data"]["rental"];
    assert_eq!(rental["payment_status"], "unpaid");
    assert_eq!(rental["payment_schedule"][0]["status"], "unpaid");
    assert!(rental["payment_schedule"][0]["payment_id"].is_null());

    let (status, _) = send(
        &app,
        Method::PUT,
        &status_uri,
        Some(&admin.token),
        Some(json!({ "status": "failed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/rentals/{}/pay", rental_id),
        Some(&tenant.token),
        Some(json!({ "month": "2025-01", "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
