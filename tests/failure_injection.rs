//! Failure injection tests for the relay.

use relay_sdk::{ProxyRequest, RelayClient};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

use api_relay::config::RelayConfig;
use api_relay::http::HttpServer;
use api_relay::lifecycle::Shutdown;

mod common;

fn fast_timeout_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstream.timeout_secs = 1;
    config.timeouts.request_secs = 5;
    config
}

#[tokio::test]
async fn test_upstream_timeout_is_connection_error() {
    let backend = common::start_silent_backend().await;
    let (addr, shutdown) = common::start_relay(fast_timeout_config()).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let start = Instant::now();
    let res = relay
        .proxy(&ProxyRequest::get(format!("http://{}/slow", backend)))
        .await
        .unwrap();

    assert_eq!(res.status, 0);
    assert_eq!(res.status_text, "Connection Error");
    assert!(res.body.contains("timed out"), "{}", res.body);
    assert!(start.elapsed() < Duration::from_secs(5));

    shutdown.trigger();
}

#[tokio::test]
async fn test_dropped_connection_is_connection_error() {
    let backend = common::start_hangup_backend().await;
    let (addr, shutdown) = common::start_relay(RelayConfig::default()).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let res = relay
        .proxy(&ProxyRequest::get(format!("http://{}/", backend)))
        .await
        .unwrap();

    assert_eq!(res.status, 0);
    assert_eq!(res.status_text, "Connection Error");
    assert!(res.headers.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_truncated_body_keeps_status_and_headers() {
    // Promises 100 body bytes, sends 5, then closes
    let backend = common::start_backend(|_| {
        b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\nX-A: 1\r\nConnection: close\r\n\r\nhello"
            .to_vec()
    })
    .await;
    let (addr, shutdown) = common::start_relay(RelayConfig::default()).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let res = relay
        .proxy(&ProxyRequest::get(format!("http://{}/", backend)))
        .await
        .unwrap();

    assert_eq!(res.status, 502);
    assert_eq!(res.status_text, "Bad Gateway");
    assert_eq!(res.headers["x-a"], "1");
    assert_eq!(res.headers["content-length"], "100");
    assert!(res.body.starts_with("failed to read response body"), "{}", res.body);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unbuildable_requests_are_generic_errors() {
    let (addr, shutdown) = common::start_relay(RelayConfig::default()).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let cases = [
        json!({ "url": "http://" }),
        json!({ "url": "http://127.0.0.1:9/", "method": "GE T" }),
        json!({ "url": "http://127.0.0.1:9/", "headers": { "X-Bad": "a\nb" } }),
    ];
    for payload in cases {
        let res = relay.proxy_raw(payload.to_string()).await.unwrap();
        assert_eq!(res.status, 0, "{payload}");
        assert_eq!(res.status_text, "Error", "{payload}");
        assert!(!res.body.is_empty());
        assert!(res.headers.is_empty());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_redirect_loop_is_generic_error() {
    let backend = common::start_backend(|_| {
        common::http_response("302 Found", &[("Location", "/loop")], b"")
    })
    .await;
    let mut config = RelayConfig::default();
    config.upstream.max_redirects = 3;
    let (addr, shutdown) = common::start_relay(config).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let res = relay
        .proxy(&ProxyRequest::get(format!("http://{}/loop", backend)))
        .await
        .unwrap();

    assert_eq!(res.status, 0);
    assert_eq!(res.status_text, "Error");

    shutdown.trigger();
}

#[tokio::test]
async fn test_relay_survives_failures() {
    let backend = common::start_mock_backend("still here").await;
    let (addr, shutdown) = common::start_relay(RelayConfig::default()).await;
    let relay = RelayClient::new(&format!("http://{}", addr));

    let _ = relay.proxy_raw("{".to_string()).await;
    let _ = relay
        .proxy(&ProxyRequest::get(format!("http://{}/", common::unused_addr())))
        .await;

    let res = relay
        .proxy(&ProxyRequest::get(format!("http://{}/", backend)))
        .await
        .unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "still here");

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = RelayConfig::default();
    config.service_name = "draining".into();
    let server = HttpServer::new(config).unwrap();
    assert_eq!(server.config().service_name, "draining");

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let health = RelayClient::new(&format!("http://{}", addr)).health().await.unwrap();
    assert_eq!(health.service, "draining");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
