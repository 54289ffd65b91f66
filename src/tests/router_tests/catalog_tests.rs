// src/tests/router_tests/catalog_tests.rs
use crate::catalog::listing::fixtures::{property, unit};
use crate::router::handle;
use crate::tests::utils::{app_state, body_json, request, FakeGateway};
use http::Method;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn gateway() -> Arc<FakeGateway> {
    let mut gateway = FakeGateway {
        properties: vec![property(1)],
        ..Default::default()
    };
    let mut leased = unit(1, 2, "2 Oak St", "Austin", 1300.0);
    leased.lease_id = Some("8".into());
    gateway
        .units
        .insert(1, vec![unit(1, 1, "1 Oak St", "Austin", 1200.0), leased]);
    Arc::new(gateway)
}

#[test]
fn status_before_first_query_does_not_build() {
    let gateway = gateway();
    let state = app_state(gateway.clone());

    let status = body_json(handle(request(Method::GET, "/api/catalog", ""), &state).unwrap());

    assert_eq!(status["built"], false);
    assert_eq!(status["listings"], 0);
    assert_eq!(gateway.property_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn refresh_rebuilds_and_reports() {
    let gateway = gateway();
    let state = app_state(gateway.clone());

    for expected_calls in 1..=2 {
        let resp = handle(request(Method::POST, "/api/catalog/refresh", ""), &state).unwrap();
        assert_eq!(resp.status(), 200);

        let status = body_json(resp);
        assert_eq!(status["built"], true);
        assert_eq!(status["listings"], 2);
        assert_eq!(status["vacant"], 1);
        assert_eq!(status["degraded"], false);
        assert_eq!(gateway.property_calls.load(Ordering::SeqCst), expected_calls);
    }

    let status = body_json(handle(request(Method::GET, "/api/catalog", ""), &state).unwrap());
    assert_eq!(status["built"], true);
    assert!(status["built_at"].is_string());
}
