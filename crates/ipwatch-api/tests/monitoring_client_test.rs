#![allow(clippy::unwrap_used)]
// Integration tests for `MonitoringClient` using wiremock.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipwatch_api::{
    Chart, ChartKind, Error, MonitoringClient, MonitoringQuery, PatentCategory, StaticToken,
    TimeRange, TokenSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

const BASE: &str = "/api/admin/monitoring";

fn endpoint(suffix: &str) -> String {
    format!("{BASE}/{suffix}")
}

async fn setup(token: impl TokenSource + 'static) -> (MockServer, MonitoringClient) {
    let server = MockServer::start().await;
    let client =
        MonitoringClient::from_reqwest(&server.uri(), reqwest::Client::new(), Arc::new(token))
            .unwrap();
    (server, client)
}

fn health_body() -> serde_json::Value {
    json!({
        "cpuUsage": 37,
        "memoryUsage": 64,
        "diskUsage": 81,
        "uptime": "5 days, 2 hours",
        "activeThreads": 42,
        "responseTime": 118
    })
}

/// Token source whose value can be swapped between requests.
#[derive(Debug, Default)]
struct RotatingToken(Mutex<Option<String>>);

impl RotatingToken {
    fn set(&self, value: &str) {
        *self.0.lock().unwrap() = Some(value.to_owned());
    }
}

impl TokenSource for RotatingToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.0.lock().unwrap().clone().map(SecretString::from)
    }
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_system_health_with_bearer_token() {
    let (server, client) = setup(StaticToken::new("admin-secret")).await;

    Mock::given(method("GET"))
        .and(path(endpoint("health")))
        .and(header("authorization", "Bearer admin-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body()))
        .expect(1)
        .mount(&server)
        .await;

    let health = client.fetch_system_health().await.unwrap();

    assert_eq!(health.cpu_usage, 37);
    assert_eq!(health.memory_usage, 64);
    assert_eq!(health.disk_usage, 81);
    assert_eq!(health.uptime, "5 days, 2 hours");
    assert_eq!(health.active_threads, 42);
    assert_eq!(health.response_time, 118);
}

#[tokio::test]
async fn test_json_headers_are_sent_by_default_transport() {
    let server = MockServer::start().await;
    let client = MonitoringClient::new(
        &server.uri(),
        Arc::new(StaticToken::none()),
        &ipwatch_api::TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("health")))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body()))
        .expect(1)
        .mount(&server)
        .await;

    client.fetch_system_health().await.unwrap();
}

#[tokio::test]
async fn test_missing_token_sends_no_authorization_header() {
    let (server, client) = setup(StaticToken::none()).await;

    Mock::given(method("GET"))
        .and(path(endpoint("activity")))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing token"))
        .mount(&server)
        .await;

    let result = client.fetch_activity_stats().await;

    assert!(
        matches!(result, Err(Error::Status { status: 401, .. })),
        "expected 401 status error, got: {result:?}"
    );
    assert!(result.unwrap_err().is_auth_rejected());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_is_read_on_every_request() {
    let token = Arc::new(RotatingToken::default());
    let server = MockServer::start().await;
    let client = MonitoringClient::from_reqwest(
        &server.uri(),
        reqwest::Client::new(),
        Arc::clone(&token) as Arc<dyn TokenSource>,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path(endpoint("health")))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body()))
        .mount(&server)
        .await;

    client.fetch_system_health().await.unwrap();
    token.set("rotated");
    client.fetch_system_health().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer rotated"
    );
}

#[tokio::test]
async fn test_fetch_traffic() {
    let (server, client) = setup(StaticToken::none()).await;

    let body = json!({
        "trafficData": [
            { "time": "2:05:08 PM", "requests": 11, "users": 30, "errors": 0 },
            { "time": "2:05:09 PM", "requests": 14, "users": 33, "errors": 1 }
        ],
        "realtimeStats": {
            "currentUsers": 88,
            "requestsPerSecond": 12,
            "activeConnections": 140,
            "bandwidth": 35
        }
    });

    Mock::given(method("GET"))
        .and(path(endpoint("traffic")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let traffic = client.fetch_traffic().await.unwrap();

    assert_eq!(traffic.traffic_data.len(), 2);
    assert_eq!(traffic.traffic_data[1].errors, 1);
    assert_eq!(traffic.realtime_stats.active_connections, 140);
}

#[tokio::test]
async fn test_fetch_chart_by_kind() {
    let (server, client) = setup(StaticToken::none()).await;

    let body = json!([
        { "name": "AI & ML", "value": 60, "color": "#3B82F6" },
        { "name": "Other", "value": 40, "color": "#6B7280" }
    ]);

    Mock::given(method("GET"))
        .and(path(endpoint("charts/categories")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let chart = client.fetch_chart(ChartKind::Categories).await.unwrap();
    assert_eq!(chart.raw(), &body);

    let Chart::Categories(shares) = chart.clone().into_view() else {
        panic!("expected categories chart, got {chart:?}");
    };
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].name, "AI & ML");
    assert_eq!(shares[1].value, 40);
}

#[tokio::test]
async fn test_fetch_standalone_chart() {
    let (server, client) = setup(StaticToken::none()).await;

    let body = json!([
        { "field": "Biotechnology", "avgDays": 97.5 },
        { "field": "Software", "avgDays": 41.0 }
    ]);

    Mock::given(method("GET"))
        .and(path(endpoint("charts/processing-times")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let chart = client.fetch_chart(ChartKind::ProcessingTimes).await.unwrap();

    let Chart::ProcessingTimes(rows) = chart.into_view() else {
        panic!("expected processing times chart");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].field, "Biotechnology");
    assert!((rows[0].avg_days - 97.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_all_data_keeps_unknown_keys() {
    let (server, client) = setup(StaticToken::none()).await;

    let body = json!({
        "systemHealth": health_body(),
        "activityStats": { "totalUsers": 10, "activeUsers": 4 },
        "patentTrends": { "totalPatents": 99 },
        "trafficData": { "trafficData": [], "realtimeStats": {} },
        "chartData": {
            "categories": [{ "name": "Other", "value": 100, "color": "#6B7280" }],
            "traffic": [{ "time": "10:00", "requests": 3, "users": 1, "errors": 0 }],
            "responsePerformance": [{ "endpoint": "/api/search", "avgResponse": 88.2, "requests": 17 }],
            "processingTimes": [{ "field": "Software", "avgDays": 41.0 }],
            "jurisdictions": [{ "code": "EP", "count": 12 }]
        },
        "generatedAt": "2026-10-16T09:00:00Z"
    });

    Mock::given(method("GET"))
        .and(path(endpoint("all-data")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let snapshot = client.fetch_all_data(&MonitoringQuery::default()).await.unwrap();

    assert_eq!(snapshot.activity_stats.total_users, 10);
    assert_eq!(snapshot.patent_trends.total_patents, 99);
    assert_eq!(snapshot.chart_data.categories.len(), 1);
    assert!(snapshot.chart_data.grant_rates.is_empty());
    assert_eq!(serde_json::to_value(&snapshot).unwrap(), body);
}

#[tokio::test]
async fn test_backend_health_shape_is_accepted() {
    let (server, client) = setup(StaticToken::none()).await;

    // The Java backend reports request statistics rather than host usage.
    let body = json!({
        "uptime": "3h 12m",
        "responseTimeMs": 12.7,
        "totalRequests": 5120,
        "requestsPerMinute": 41.3,
        "errorRatePercent": 0.4,
        "endpoints": { "/api/patents": { "count": 200, "avgMs": 9.1 } },
        "trafficData": { "10:00": 12 },
        "realtimeStats": { "activeConnections": 3 }
    });

    Mock::given(method("GET"))
        .and(path(endpoint("health")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let health = client.fetch_system_health().await.unwrap();

    assert_eq!(health.uptime, "3h 12m");
    assert_eq!(health.cpu_usage, 0);
    assert_eq!(health.raw(), &body);
}

#[tokio::test]
async fn test_fetch_all_data_with_filters() {
    let (server, client) = setup(StaticToken::none()).await;

    Mock::given(method("GET"))
        .and(path(endpoint("all-data")))
        .and(query_param("timeRange", "7d"))
        .and(query_param("category", "ai"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let query = MonitoringQuery::default()
        .time_range(TimeRange::Week)
        .category(PatentCategory::Ai);
    let err = client.fetch_all_data(&query).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unfiltered_all_data_has_no_query_string() {
    let (server, client) = setup(StaticToken::none()).await;

    Mock::given(method("GET"))
        .and(path(endpoint("all-data")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let _ = client.fetch_all_data(&MonitoringQuery::default()).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

// ── Failure shapes ──────────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup(StaticToken::none()).await;

    Mock::given(method("GET"))
        .and(path(endpoint("trends")))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"totalPatents\": 12,"))
        .mount(&server)
        .await;

    let err = client.fetch_patent_trends().await.unwrap_err();

    match err {
        Error::Deserialization { ref body, .. } => {
            assert_eq!(body, "{\"totalPatents\": 12,");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_unexpected_shape_is_still_a_response() {
    let (server, client) = setup(StaticToken::none()).await;

    Mock::given(method("GET"))
        .and(path(endpoint("charts/grant-rates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rates": []})))
        .mount(&server)
        .await;

    let chart = client.fetch_chart(ChartKind::GrantRates).await.unwrap();

    assert_eq!(chart.kind(), ChartKind::GrantRates);
    assert!(chart.is_empty());
    assert_eq!(chart.raw(), &json!({"rates": []}));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MonitoringClient::from_reqwest(
        &format!("http://{addr}"),
        reqwest::Client::new(),
        Arc::new(StaticToken::none()),
    )
    .unwrap();

    let err = client.fetch_system_health().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}
