//! Concurrency test: independent requests relayed in parallel.

use relay_sdk::{ProxyRequest, RelayClient};
use std::sync::Arc;
use std::time::Instant;

use api_relay::config::RelayConfig;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_relaying() {
    // 1. Backend that answers with the path it was asked for
    let backend = common::start_backend(|captured| {
        common::http_response("200 OK", &[], captured.path.as_bytes())
    })
    .await;

    // 2. Start relay
    let (addr, shutdown) = common::start_relay(RelayConfig::default()).await;
    let relay = Arc::new(RelayClient::new(&format!("http://{}", addr)));

    // 3. Fan out
    let concurrency = 20;
    let requests_per_task = 10;
    let start = Instant::now();

    let mut handles = Vec::new();
    for task in 0..concurrency {
        let relay = relay.clone();
        handles.push(tokio::spawn(async move {
            let mut ok = 0;
            for i in 0..requests_per_task {
                let path = format!("/t{}/r{}", task, i);
                let res = relay
                    .proxy(&ProxyRequest::get(format!("http://{}{}", backend, path)))
                    .await
                    .unwrap();
                if res.status == 200 && res.body == path {
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut total_ok = 0;
    for handle in handles {
        total_ok += handle.await.unwrap();
    }
    let elapsed = start.elapsed();

    println!(
        "Relayed {} requests in {:?} ({:.0} req/s)",
        concurrency * requests_per_task,
        elapsed,
        (concurrency * requests_per_task) as f64 / elapsed.as_secs_f64()
    );

    // 4. Every response matches its own request; nothing crossed over
    assert_eq!(total_ok, concurrency * requests_per_task);

    shutdown.trigger();
}
