// src/tests/router_tests/query_tests.rs
use crate::catalog::listing::fixtures::{property, unit};
use crate::errors::ServerError;
use crate::router::{handle, AppState};
use crate::tests::utils::{app_state, body_json, request, FakeGateway};
use http::Method;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Austin: 123 Main St (vacant, 1500), 77 Lake Dr (leased, 2400, 3 beds).
/// Dallas: 9 Elm St (vacant, 1200).
fn state() -> (Arc<FakeGateway>, AppState) {
    let mut lake = unit(1, 11, "77 Lake Dr", "Austin", 2400.0);
    lake.beds = 3;
    lake.lease_id = Some("501".into());

    let mut gateway = FakeGateway {
        properties: vec![property(1), property(2)],
        ..Default::default()
    };
    gateway
        .units
        .insert(1, vec![unit(1, 10, "123 Main St", "Austin", 1500.0), lake]);
    gateway
        .units
        .insert(2, vec![unit(2, 20, "9 Elm St", "Dallas", 1200.0)]);

    let gateway = Arc::new(gateway);
    (gateway.clone(), app_state(gateway))
}

fn post_query(state: &AppState, body: serde_json::Value) -> serde_json::Value {
    let req = request(Method::POST, "/api/property-query", &body.to_string());
    let resp = handle(req, state).unwrap();
    assert_eq!(resp.status(), 200);
    body_json(resp)
}

fn unit_ids(resp: &serde_json::Value) -> Vec<i64> {
    resp["data"]["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["unit_id"].as_i64().unwrap())
        .collect()
}

#[test]
fn health_check() {
    let (_, state) = state();
    let resp = handle(request(Method::GET, "/health", ""), &state).unwrap();
    assert_eq!(body_json(resp), json!({ "status": "healthy" }));
}

#[test]
fn details_by_partial_address() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({
            "query_type": "property_details",
            "user_message": "how many bathrooms?",
            "address": "  123 MAIN "
        }),
    );

    assert_eq!(resp["success"], true);
    assert_eq!(resp["property_found"], true);
    assert_eq!(resp["data"]["unit_id"], 10);
    assert_eq!(resp["data"]["is_available"], true);
    assert_eq!(resp["data"]["rent"], 1500.0);
    assert_eq!(
        resp["response_text"],
        "123 Main St has 2 bedrooms and 1 full bathrooms."
    );
}

#[test]
fn details_not_found() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({
            "query_type": "details",
            "user_message": "tell me about it",
            "address": "999 Nowhere"
        }),
    );

    assert_eq!(resp["success"], false);
    assert_eq!(resp["property_found"], false);
    assert_eq!(
        resp["response_text"],
        "I couldn't find a property at 999 Nowhere. Could you double-check the address?"
    );
}

#[test]
fn details_without_address_never_touches_backend() {
    let (gateway, state) = state();
    let resp = post_query(
        &state,
        json!({ "query_type": "property_details", "user_message": "details please" }),
    );

    assert_eq!(resp["success"], false);
    assert_eq!(
        resp["response_text"],
        "I need an address to look up property details."
    );
    assert_eq!(gateway.property_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn available_listings_skip_leased_units() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({
            "query_type": "available_listings",
            "user_message": "what's open?",
            "min_rent": 1000,
            "max_rent": 2000
        }),
    );

    assert_eq!(unit_ids(&resp), vec![10, 20]);
    assert!(resp["response_text"]
        .as_str()
        .unwrap()
        .starts_with("I found 2 available properties."));
}

#[test]
fn search_includes_occupied_and_filters_city() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({
            "query_type": "search",
            "user_message": "anything in austin",
            "city": "AUSTIN"
        }),
    );

    assert_eq!(unit_ids(&resp), vec![10, 11]);
    assert_eq!(resp["data"]["properties"][1]["is_available"], false);
    assert!(resp["response_text"].as_str().unwrap().contains("(Occupied)"));
}

#[test]
fn search_min_beds() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({ "query_type": "search", "user_message": "3 bedrooms", "beds": 3 }),
    );
    assert_eq!(unit_ids(&resp), vec![11]);
}

#[test]
fn budget_filter_is_vacant_only() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({
            "query_type": "budget_filter",
            "user_message": "under 3000",
            "max_rent": 3000,
            "beds": 3
        }),
    );

    // beds is ignored for budget queries; the leased 3-bed is excluded
    assert_eq!(unit_ids(&resp), vec![10, 20]);
}

#[test]
fn unknown_query_type_gets_polite_reply() {
    let (_, state) = state();
    let resp = post_query(
        &state,
        json!({ "query_type": "weather", "user_message": "is it sunny?" }),
    );

    assert_eq!(resp["success"], false);
    assert_eq!(resp["error"], "Unknown query type");
}

#[test]
fn catalog_is_fetched_once_across_queries() {
    let (gateway, state) = state();
    for _ in 0..3 {
        post_query(
            &state,
            json!({ "query_type": "search", "user_message": "all" }),
        );
    }
    assert_eq!(gateway.property_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn invalid_json_is_bad_request() {
    let (_, state) = state();
    let err = handle(
        request(Method::POST, "/api/property-query", "{not json"),
        &state,
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    // user_message is required
    let err = handle(
        request(
            Method::POST,
            "/api/property-query",
            r#"{"query_type":"search"}"#,
        ),
        &state,
    )
    .unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn unknown_route_and_wrong_method() {
    let (_, state) = state();

    let err = handle(request(Method::GET, "/nope", ""), &state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let err = handle(request(Method::GET, "/api/property-query", ""), &state).unwrap_err();
    assert!(matches!(err, ServerError::MethodNotAllowed));
}
