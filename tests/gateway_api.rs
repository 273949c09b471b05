//! HTTP-level tests for analytics, integrations, CORS, documentation
//! fallback and method handling.

#![allow(clippy::panic)]

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use camerpulse_gateway::domain::PollId;

use common::TestGateway;

#[tokio::test]
async fn analytics_without_poll_id_never_touches_storage() {
    let gateway = TestGateway::new();
    let response = gateway.get("/analytics").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "poll_id is required");
    assert_eq!(gateway.store.operation_count(), 0);

    let blank = gateway.get("/analytics?poll_id=").await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(gateway.store.operation_count(), 0);
}

#[tokio::test]
async fn analytics_reports_measured_overview() {
    let gateway = TestGateway::new();
    let poll_id = PollId::new();
    gateway.store.record_vote(poll_id, 0, Some("u1")).await;
    gateway.store.record_vote(poll_id, 1, Some("u2")).await;
    gateway.store.record_vote(poll_id, 1, Some("u1")).await;
    for _ in 0..4 {
        gateway.store.record_view(poll_id, None).await;
    }

    let response = gateway
        .get(&format!("/analytics?poll_id={poll_id}&granularity=day"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let report = response.json();
    assert_eq!(report["pollId"], poll_id.to_string());
    assert_eq!(report["overview"]["totalVotes"], 3);
    assert_eq!(report["overview"]["totalViews"], 4);
    assert_eq!(report["overview"]["uniqueVoters"], 2);
    assert_eq!(report["dataQuality"]["trends"], "synthetic");
    assert_eq!(report["dataQuality"]["demographics"], "placeholder");

    let Some(trends) = report["trends"].as_array() else {
        panic!("trends should be an array");
    };
    assert_eq!(trends.len(), 30);
    let Some(regions) = report["demographics"]["regions"].as_array() else {
        panic!("regions should be an array");
    };
    let sum: u64 = regions
        .iter()
        .filter_map(|r| r["percentage"].as_u64())
        .sum();
    assert_eq!(sum, 100);
}

#[tokio::test]
async fn integrations_catalog_is_fixed() {
    let gateway = TestGateway::new();
    gateway
        .post(
            "/integrations",
            json!({ "integration": "slack", "config": { "webhook_url": "https://hooks.slack.com/x" } }),
        )
        .await;

    let response = gateway.get("/integrations").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let Some(catalog) = body["integrations"].as_array() else {
        panic!("integrations should be an array");
    };
    let ids: Vec<&str> = catalog.iter().filter_map(|i| i["id"].as_str()).collect();
    assert_eq!(ids, ["slack", "microsoft_teams", "zapier", "google_sheets"]);
}

#[tokio::test]
async fn configuring_integration_stores_active_row() {
    let gateway = TestGateway::new();
    let response = gateway
        .post("/integrations", json!({ "integration": "zapier" }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["integration"]["integration_type"], "zapier");
    assert_eq!(body["integration"]["is_active"], true);
    assert_eq!(body["integration"]["configuration"], json!({}));
    assert_eq!(gateway.store.integrations().await.len(), 1);
}

#[tokio::test]
async fn configuring_without_type_is_rejected() {
    let gateway = TestGateway::new();
    let response = gateway
        .post("/integrations", json!({ "config": {} }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(gateway.store.integrations().await.is_empty());
}

#[tokio::test]
async fn options_on_any_path_is_empty_ok_with_cors() {
    let gateway = TestGateway::new();
    for uri in ["/polls", "/webhooks", "/nowhere"] {
        let response = gateway.send(Method::OPTIONS, uri, None).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert!(response.body.is_empty(), "{uri}");
        assert_eq!(
            response
                .headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*"),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn plain_responses_carry_cors_origin() {
    let gateway = TestGateway::new();
    let response = gateway.get("/integrations").await;
    assert!(
        response
            .headers
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn unknown_path_returns_documentation() {
    let gateway = TestGateway::new();
    let response = gateway.get("/does/not/exist").await;
    assert_eq!(response.status, StatusCode::OK);
    let doc = response.json();
    assert!(doc["title"].is_string());
    assert!(doc["version"].is_string());
    let Some(endpoints) = doc["endpoints"].as_array() else {
        panic!("endpoints should be an array");
    };
    assert_eq!(endpoints.len(), 4);
}

#[tokio::test]
async fn unsupported_method_is_json_405() {
    let gateway = TestGateway::new();
    let response = gateway.send(Method::PUT, "/polls", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.json(), json!({ "error": "Method not allowed", "code": 1005 }));

    let response = gateway.send(Method::POST, "/analytics", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn any_prefix_reaches_resource() {
    let gateway = TestGateway::new();

    let created = gateway
        .post("/anything/polls", json!({ "poll": { "title": "hosted" } }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let listed = gateway.get("/anything/polls").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json()["total_count"], 1);

    let catalog = gateway
        .get("/functions/v1/poll-api-gateway/integrations")
        .await
        .json();
    assert!(catalog.get("endpoints").is_none());
    let Some(integrations) = catalog["integrations"].as_array() else {
        panic!("integrations should be an array");
    };
    assert_eq!(integrations.len(), 4);

    let response = gateway.send(Method::PUT, "/anything/webhooks", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn near_miss_segments_get_documentation() {
    let gateway = TestGateway::new();
    for uri in ["/polls/extra", "/polls/", "/Polls"] {
        let response = gateway.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert!(response.json().get("endpoints").is_some(), "{uri}");
    }
}

#[tokio::test]
async fn base_path_narrows_resource_routes() {
    let base = "/functions/v1/poll-api-gateway";
    let gateway = TestGateway::with_base_path(base);

    let created = gateway
        .post(&format!("{base}/polls"), json!({ "poll": { "title": "prefixed" } }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let unprefixed = gateway.get("/polls").await.json();
    assert!(unprefixed.get("endpoints").is_some());
    assert_eq!(unprefixed["base_path"], base);

    let health = gateway.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
}
