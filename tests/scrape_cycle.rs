//! End-to-end scrape tests against an in-process mock Burrow server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use tokio::net::TcpListener;

use burrow_exporter::burrow::{BurrowClient, BurrowError, LagSource};
use burrow_exporter::config::{BurrowConfig, ScrapeConfig};
use burrow_exporter::lifecycle::Shutdown;
use burrow_exporter::observability::metrics as exposition;
use burrow_exporter::observability::PrometheusSink;
use burrow_exporter::Scraper;

async fn serve_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mock Burrow with one cluster and two groups, one of which always fails.
fn mock_burrow() -> Router {
    Router::new()
        .route(
            "/v3/kafka",
            get(|| async {
                Json(json!({
                    "error": false,
                    "message": "cluster list returned",
                    "clusters": ["local"]
                }))
            }),
        )
        .route(
            "/v3/kafka/{cluster}/consumer",
            get(|Path(_cluster): Path<String>| async move {
                Json(json!({
                    "error": false,
                    "message": "consumer list returned",
                    "consumers": ["good-group", "bad-group"]
                }))
            }),
        )
        .route(
            "/v3/kafka/{cluster}/consumer/{group}/lag",
            get(|Path((cluster, group)): Path<(String, String)>| async move {
                if group == "bad-group" {
                    return Json(json!({"error": true, "message": "group not found"}));
                }
                Json(json!({
                    "error": false,
                    "message": "consumer status returned",
                    "status": {
                        "cluster": cluster,
                        "group": group,
                        "totallag": 5,
                        "partitions": [
                            {
                                "topic": "t",
                                "partition": 0,
                                "end": {"offset": 100, "lag": 5, "max_offset": 105}
                            }
                        ]
                    }
                }))
            }),
        )
}

fn client_for(addr: SocketAddr) -> BurrowClient {
    BurrowClient::new(&BurrowConfig {
        base_url: format!("http://{addr}"),
        api_timeout_secs: 5,
    })
    .unwrap()
}

/// Find a rendered series by name and label fragments and return its value.
fn series_value(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    rendered.lines().find_map(|line| {
        let rest = line.strip_prefix(name)?;
        if !rest.starts_with('{') && !rest.starts_with(' ') {
            return None;
        }
        if !labels
            .iter()
            .all(|(k, v)| line.contains(&format!("{k}=\"{v}\"")))
        {
            return None;
        }
        line.rsplit(' ').next()?.parse().ok()
    })
}

#[tokio::test]
async fn client_walks_the_burrow_api() {
    let addr = serve_router(mock_burrow()).await;
    let client = client_for(addr);

    assert_eq!(client.list_clusters().await.unwrap(), vec!["local"]);
    assert_eq!(
        client.list_consumer_groups("local").await.unwrap(),
        vec!["good-group", "bad-group"]
    );

    let status = client.group_lag("local", "good-group").await.unwrap();
    assert_eq!(status.cluster, "local");
    assert_eq!(status.group, "good-group");
    assert_eq!(status.total_lag, 5);
    assert_eq!(status.partitions.len(), 1);
    assert_eq!(status.partitions[0].offset, 100);
    assert_eq!(status.partitions[0].max_offset, 105);

    // Burrow error envelopes surface as errors, not empty results.
    assert!(matches!(
        client.group_lag("local", "bad-group").await,
        Err(BurrowError::Api(_))
    ));
}

#[tokio::test]
async fn client_surfaces_http_failures() {
    let broken = Router::new().route(
        "/v3/kafka",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve_router(broken).await;
    let client = client_for(addr);

    assert!(matches!(
        client.list_clusters().await,
        Err(BurrowError::Status { .. })
    ));

    // Nothing listens on port 1; the transport error is not fatal either.
    let unreachable = BurrowClient::new(&BurrowConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_timeout_secs: 1,
    })
    .unwrap();
    assert!(matches!(
        unreachable.list_clusters().await,
        Err(BurrowError::Transport(_))
    ));
}

#[tokio::test]
async fn full_cycle_renders_prometheus_series() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    metrics::set_global_recorder(recorder).expect("recorder installed once per process");
    exposition::describe_metrics();

    let addr = serve_router(mock_burrow()).await;
    let client = Arc::new(client_for(addr));
    let sink = Arc::new(PrometheusSink::new());

    let shutdown = Shutdown::new();
    let scraper = Scraper::new(
        client,
        sink,
        ScrapeConfig {
            interval_secs: 1,
            max_concurrent_clusters: 2,
            max_concurrent_groups: 4,
        },
    );
    let task = tokio::spawn(scraper.run(shutdown.subscribe()));

    // One interval plus slack for the cycle to drain.
    tokio::time::sleep(Duration::from_millis(1600)).await;
    shutdown.trigger();
    task.await.unwrap();

    let rendered = handle.render();
    let labels = [
        ("cluster", "local"),
        ("group", "good-group"),
        ("topic", "t"),
        ("partition", "0"),
    ];
    assert_eq!(
        series_value(&rendered, "consumer_partition_lag", &labels),
        Some(5.0)
    );
    assert_eq!(
        series_value(&rendered, "consumer_partition_current_offset", &labels),
        Some(100.0)
    );
    assert_eq!(
        series_value(&rendered, "consumer_partition_max_offset", &labels),
        Some(105.0)
    );
    assert_eq!(
        series_value(
            &rendered,
            "consumer_total_lag",
            &[("cluster", "local"), ("group", "good-group")]
        ),
        Some(5.0)
    );

    // The failing group produced no series at all.
    assert!(!rendered.contains("bad-group"));

    // Cycle self-metrics: the cluster listing succeeded.
    assert_eq!(series_value(&rendered, "lag_exporter_up", &[]), Some(1.0));

    // The exposition endpoint serves the same text.
    let metrics_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let metrics_addr = metrics_listener.local_addr().unwrap();
    let server = tokio::spawn(exposition::serve(
        metrics_listener,
        handle.clone(),
        shutdown.subscribe(),
    ));

    let body = reqwest::get(format!("http://{metrics_addr}/metrics"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("consumer_total_lag"));

    shutdown.trigger();
    let _ = server.await;
}
