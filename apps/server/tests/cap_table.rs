use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use captable_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_test_router() -> Router {
    let config = Config::default();
    app_router(build_state(&config), &config)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn seed_state() -> Value {
    json!({
        "initialValuation": 1000000,
        "initialPricePerShare": 1,
        "founders": [{ "id": "f1", "name": "Ada", "shares": 1000000 }],
        "fundingRounds": [{
            "id": "seed",
            "name": "Seed",
            "calculationMethod": "by_valuation",
            "preMoneyValuation": 4000000,
            "investors": [{ "id": "i1", "name": "Angel", "amountInvested": 1000000 }]
        }]
    })
}

#[tokio::test]
async fn calculate_returns_round_history() {
    let app = build_test_router();
    let (status, table) = post_json(&app, "/api/v1/cap-table/calculate", seed_state()).await;

    assert_eq!(status, StatusCode::OK);
    let rounds = table["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0]["roundId"], "initial");
    assert_eq!(rounds[1]["roundId"], "seed");
    assert_eq!(rounds[1]["pricePerShare"], 4.0);
    assert_eq!(rounds[1]["postMoneyValuation"], 5000000.0);
    assert_eq!(rounds[1]["totalShares"], 1250000.0);
    assert_eq!(rounds[1]["entries"][0]["ownershipPercentage"], 80.0);
    assert_eq!(rounds[1]["entries"][1]["ownershipPercentage"], 20.0);
}

#[tokio::test]
async fn calculate_accepts_empty_state() {
    let app = build_test_router();
    let (status, table) = post_json(&app, "/api/v1/cap-table/calculate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["rounds"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn calculate_survives_offsetting_founder_shares() {
    let app = build_test_router();
    let (status, table) = post_json(
        &app,
        "/api/v1/cap-table/calculate",
        json!({
            "founders": [
                { "id": "f1", "name": "Ada", "shares": 1e10 },
                { "id": "f2", "name": "Grace", "shares": -1e10 },
                { "id": "f3", "name": "Eve", "shares": 1e-18 }
            ],
            "fundingRounds": [{
                "id": "seed",
                "name": "Seed",
                "calculationMethod": "by_valuation",
                "preMoneyValuation": 4000000,
                "investors": [{ "id": "i1", "name": "Angel", "amountInvested": 1000000 }]
            }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rounds = table["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0]["entries"].as_array().unwrap().len(), 3);
    assert_eq!(rounds[0]["entries"][0]["ownershipPercentage"], 0.0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/calculate",
        json!({ "fundingRounds": [{ "id": "x", "name": "X", "calculationMethod": "by_magic" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn edit_returns_state_and_recalculated_table() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/edits",
        json!({
            "state": seed_state(),
            "edit": {
                "type": "updateInvestor",
                "roundId": "seed",
                "investorId": "i1",
                "amountInvested": 4000000
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["state"]["fundingRounds"][0]["investors"][0]["amountInvested"],
        4000000.0
    );
    assert_eq!(body["table"]["rounds"][1]["entries"][1]["ownershipPercentage"], 50.0);
}

#[tokio::test]
async fn edit_adding_founder_keeps_valuation_in_step() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/edits",
        json!({
            "state": seed_state(),
            "edit": { "type": "addFounder", "name": "Grace", "shares": 500000 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["founders"].as_array().unwrap().len(), 2);
    assert_eq!(body["state"]["initialValuation"], 1500000.0);
    assert_eq!(body["table"]["rounds"][0]["totalShares"], 1500000.0);
}

#[tokio::test]
async fn edit_with_unknown_round_is_not_found() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/edits",
        json!({
            "state": seed_state(),
            "edit": { "type": "removeRound", "roundId": "series-z" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Funding round not found: series-z");
}

#[tokio::test]
async fn edit_with_invalid_input_is_bad_request() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/edits",
        json!({
            "state": seed_state(),
            "edit": { "type": "addFounder", "name": "  ", "shares": 10 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn initial_terms_resolves_price() {
    let app = build_test_router();
    let (status, terms) = post_json(
        &app,
        "/api/v1/cap-table/initial-terms",
        json!({
            "terms": { "shares": 2000000, "valuation": 0, "pricePerShare": 0 },
            "edit": { "field": "valuation", "value": 5000000 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(terms["valuation"], 5000000.0);
    assert_eq!(terms["pricePerShare"], 2.5);
    assert_eq!(terms["shares"], 2000000.0);
}

#[tokio::test]
async fn palette_assigns_colors() {
    let app = build_test_router();
    let (status, body) = post_json(
        &app,
        "/api/v1/cap-table/palette",
        json!({
            "shareholders": [
                { "id": "f1", "role": "founder" },
                { "id": "i1", "role": "investor" },
                { "id": "", "role": "investor" }
            ],
            "roundIds": ["initial", "seed", "series-a"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let shareholders = body["shareholders"].as_array().unwrap();
    assert!(shareholders[0]["color"].as_str().unwrap().starts_with("bg-blue-"));
    assert_eq!(shareholders[0]["badge"], "bg-blue-100");
    assert!(!shareholders[1]["color"].as_str().unwrap().starts_with("bg-blue-"));
    assert_eq!(shareholders[2]["color"], "bg-gray-200");
    assert_eq!(shareholders[2]["badge"], "bg-gray-50");

    let rounds = body["rounds"].as_array().unwrap();
    assert_eq!(rounds[0]["color"], "blue");
    assert_eq!(rounds[1]["color"], "green");
    assert_eq!(rounds[2]["color"], "purple");
}
