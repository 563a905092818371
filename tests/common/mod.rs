//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use request_tracer::logging::SharedLogger;
use request_tracer::{HttpServer, ServiceConfig, Shutdown};
use tokio::net::TcpListener;

/// Start an `HttpServer` on an ephemeral port with `logger` as the base logger.
pub async fn start_server(config: ServiceConfig, logger: SharedLogger) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::with_logger(config, logger).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    wait_until_ready(addr).await;
    (addr, shutdown)
}

async fn wait_until_ready(addr: SocketAddr) {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {} did not start", addr);
}

/// Client that never pools connections, so each request is independent.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
