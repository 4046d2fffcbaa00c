//! HTTP-level tests driving the API router with in-process requests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use deedvault_server::escrow::{EscrowLedger, EscrowRoles, ListingPolicy};
use deedvault_server::models::Address;
use deedvault_server::registry::TitleRegistry;
use deedvault_server::routes;
use deedvault_server::state::AppState;

struct TestApp {
    app: Router,
    seller: Address,
    buyer: Address,
    ledger_address: Address,
    registry_address: Address,
}

fn spawn_app() -> TestApp {
    let registry = Arc::new(TitleRegistry::new());
    let seller = Address::new();
    let buyer = Address::new();
    let ledger = Arc::new(EscrowLedger::new(
        registry.clone(),
        EscrowRoles {
            seller,
            inspector: Address::new(),
            lender: Address::new(),
        },
        ListingPolicy::default(),
    ));

    let ledger_address = ledger.address();
    let registry_address = registry.address();
    let app = routes::api_router().with_state(AppState::new(registry, ledger));

    TestApp {
        app,
        seller,
        buyer,
        ledger_address,
        registry_address,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Mint title #1 to the seller and approve the ledger as its operator
async fn mint_and_approve(test_app: &TestApp) {
    let (status, body) = post(
        &test_app.app,
        "/api/titles",
        json!({
            "caller": test_app.seller.to_string(),
            "metadata_uri": "ipfs://deeds/1.json",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_id"], 1);

    let (status, _) = post(
        &test_app.app,
        "/api/titles/1/approve",
        json!({
            "caller": test_app.seller.to_string(),
            "operator": test_app.ledger_address.to_string(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn list_body(test_app: &TestApp) -> Value {
    json!({
        "caller": test_app.seller.to_string(),
        "token_id": 1,
        "buyer": test_app.buyer.to_string(),
        "purchase_price": "20000000000000000000",
        "escrow_amount": "10000000000000000000",
    })
}

#[tokio::test]
async fn test_escrow_info_reports_deployment_wiring() {
    let test_app = spawn_app();

    let (status, body) = get(&test_app.app, "/api/escrow").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["nft_address"],
        test_app.registry_address.to_string()
    );
    assert_eq!(body["data"]["seller"], test_app.seller.to_string());
    assert_eq!(body["data"]["address"], test_app.ledger_address.to_string());
}

#[tokio::test]
async fn test_full_listing_flow_over_http() {
    let test_app = spawn_app();
    mint_and_approve(&test_app).await;

    let (status, body) = post(&test_app.app, "/api/listings", list_body(&test_app)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_listed"], true);

    let (status, body) = get(&test_app.app, "/api/listings/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["buyer"], test_app.buyer.to_string());
    assert_eq!(body["data"]["purchase_price"], "20000000000000000000");
    assert_eq!(body["data"]["escrow_amount"], "10000000000000000000");

    let (status, body) = get(&test_app.app, "/api/listings/1/listed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_listed"], true);

    // Custody moved to the ledger
    let (status, body) = get(&test_app.app, "/api/titles/1/owner").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["owner"], test_app.ledger_address.to_string());
}

#[tokio::test]
async fn test_mint_with_empty_metadata_uri_is_rejected() {
    let test_app = spawn_app();

    let (status, body) = post(
        &test_app.app,
        "/api/titles",
        json!({
            "caller": test_app.seller.to_string(),
            "metadata_uri": "",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_by_non_seller_is_forbidden() {
    let test_app = spawn_app();
    mint_and_approve(&test_app).await;

    let mut body = list_body(&test_app);
    body["caller"] = Value::String(test_app.buyer.to_string());
    let (status, body) = post(&test_app.app, "/api/listings", body).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    // No listing was recorded
    let (status, body) = get(&test_app.app, "/api/listings/1/listed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_listed"], false);
}

#[tokio::test]
async fn test_duplicate_listing_is_conflict() {
    let test_app = spawn_app();
    mint_and_approve(&test_app).await;

    let (status, _) = post(&test_app.app, "/api/listings", list_body(&test_app)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&test_app.app, "/api/listings", list_body(&test_app)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_listing_without_approval_is_unprocessable() {
    let test_app = spawn_app();

    let (status, _) = post(
        &test_app.app,
        "/api/titles",
        json!({
            "caller": test_app.seller.to_string(),
            "metadata_uri": "ipfs://deeds/1.json",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&test_app.app, "/api/listings", list_body(&test_app)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
}

#[tokio::test]
async fn test_unknown_ids() {
    let test_app = spawn_app();

    // Unknown listing: the flag endpoint answers false, the record is a 404
    let (status, body) = get(&test_app.app, "/api/listings/99/listed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_listed"], false);

    let (status, body) = get(&test_app.app, "/api/listings/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = get(&test_app.app, "/api/titles/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
