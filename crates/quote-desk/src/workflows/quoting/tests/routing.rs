use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::quoting::domain::{RuleAction, RuleKind};
use crate::workflows::quoting::router::quote_router;
use crate::workflows::quoting::service::QuoteService;

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn quote_endpoint_returns_partitioned_plans() {
    let app = quote_router_with_service(build_service());

    let response = app
        .oneshot(post_json(
            "/api/v1/quotes",
            json!({
                "first_name": "Dana",
                "last_name": "Reyes",
                "age": 64,
                "state": "CA",
                "conditions": ["stroke"],
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["client"]["name"], "Dana Reyes");
    assert_eq!(body["eligible_plans"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["eligible_plans"][0]["company"], "Golden Shield");
    assert_eq!(
        body["ineligible_plans"][0]["reason"],
        "Ineligible due to health condition: Stroke"
    );
    assert_eq!(body["eligible_by_company"][0]["company"], "Golden Shield");
}

#[tokio::test]
async fn quote_endpoint_accepts_minimal_payload() {
    let app = quote_router_with_service(build_service());

    let response = app
        .oneshot(post_json("/api/v1/quotes", json!({ "state": "NY" })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["eligible_plans"], json!([]));
    assert_eq!(
        body["ineligible_plans"][0]["reason"],
        "Plan not available in client's state"
    );
}

#[tokio::test]
async fn quote_endpoint_tolerates_blank_and_out_of_range_ages() {
    for age in [json!(""), json!(300), json!("67")] {
        let app = quote_router_with_service(build_service());

        let response = app
            .oneshot(post_json(
                "/api/v1/quotes",
                json!({ "first_name": "Dana", "age": age, "state": "ca" }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK, "age {age}");
        let body = read_json_body(response).await;
        assert_eq!(body["client"]["state"], "CA");
        assert_eq!(body["eligible_plans"].as_array().map(Vec::len), Some(2));
    }
}

#[tokio::test]
async fn plan_check_endpoint_maps_missing_plan_to_not_found() {
    let app = quote_router_with_service(build_service());

    let response = app
        .oneshot(post_json(
            "/api/v1/quotes/plans/unknown",
            json!({ "state": "CA" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "plan 'unknown' not found");
}

#[tokio::test]
async fn plan_check_endpoint_reports_eligibility() {
    let app = quote_router_with_service(build_service());

    let response = app
        .oneshot(post_json(
            "/api/v1/quotes/plans/gs",
            json!({ "state": "FL", "answers": { "q3": true } }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["eligible"], json!(true));
    assert_eq!(body["plan"]["reason"], "Eligible for this plan");
    assert!(body.get("blocking_rule").is_none());
}

#[tokio::test]
async fn unavailable_catalog_maps_to_service_unavailable() {
    let app = quote_router(Arc::new(QuoteService::new(Arc::new(UnavailableCatalog))));

    let response = app
        .oneshot(post_json("/api/v1/quotes", json!({ "state": "CA" })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "catalog unavailable: database offline");
}

#[tokio::test]
async fn catalog_lookup_endpoints_serve_reference_data() {
    let app = quote_router_with_service(seed_service());

    let states = app
        .clone()
        .oneshot(get("/api/v1/catalog/states"))
        .await
        .expect("router responds");
    assert_eq!(states.status(), StatusCode::OK);
    let states = read_json_body(states).await;
    assert_eq!(states.as_array().map(Vec::len), Some(10));

    let conditions = app
        .clone()
        .oneshot(get("/api/v1/catalog/conditions?search=heart"))
        .await
        .expect("router responds");
    let conditions = read_json_body(conditions).await;
    assert_eq!(conditions[0]["name"], "Heart Attack");
    assert_eq!(conditions.as_array().map(Vec::len), Some(1));

    let medications = app
        .clone()
        .oneshot(get("/api/v1/catalog/medications"))
        .await
        .expect("router responds");
    let medications = read_json_body(medications).await;
    assert_eq!(medications.as_array().map(Vec::len), Some(5));

    let questions = app
        .oneshot(get("/api/v1/catalog/questions?company_id=3"))
        .await
        .expect("router responds");
    let questions = read_json_body(questions).await;
    assert_eq!(questions[0]["company"], "UnitedHealthcare");
    assert_eq!(
        questions[0]["questions"][0]["text"],
        "Have you been diagnosed with any form of cancer in the past 5 years?"
    );
}

#[tokio::test]
async fn integrity_endpoint_lists_issue_details() {
    let mut document = document();
    document.rules.push(rule(
        "ghost",
        "gi",
        RuleKind::Question,
        "removed",
        RuleAction::BlockIfYes,
    ));
    let app = quote_router_with_service(QuoteService::new(Arc::new(MemoryCatalog::new(
        snapshot(document),
    ))));

    let response = app
        .oneshot(get("/api/v1/catalog/integrity"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["issue_count"], json!(1));
    assert_eq!(body["issues"][0]["issue"], "dangling_rule_target");
    assert_eq!(
        body["details"][0],
        "rule ghost targets missing question 'removed'"
    );
}
