//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use dynamic_router::lifecycle::startup::{self, StartupError};
use dynamic_router::{RouterConfig, Shutdown};

/// Start a mock backend on an ephemeral port.
///
/// Every response body is `"<label> <request path>"`, so tests can tell
/// which backend answered and what path reached it.
pub async fn start_mock_backend(label: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let head = String::from_utf8_lossy(&buf);
                        let path = head.split_whitespace().nth(1).unwrap_or("/");
                        let body = format!("{} {}", label, path);
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Unique route list path under the system temp directory.
pub fn temp_route_file() -> PathBuf {
    std::env::temp_dir().join(format!("router-routes-{}.json", uuid::Uuid::new_v4()))
}

/// Write `contents` to `path` and stamp it with a modification time
/// `offset_secs` past the epoch baseline, so each write is seen as a change.
pub fn write_routes(path: &Path, contents: &str, offset_secs: u64) {
    std::fs::write(path, contents).unwrap();
    let file = std::fs::File::options().write(true).open(path).unwrap();
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs);
    file.set_modified(stamp).unwrap();
}

pub fn route_json(routes: &[(&str, SocketAddr)]) -> String {
    let records: Vec<_> = routes
        .iter()
        .map(|(name, addr)| serde_json::json!({ "name": name, "address": addr.to_string() }))
        .collect();
    serde_json::Value::Array(records).to_string()
}

/// A router serving on an ephemeral port.
pub struct TestRouter {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), StartupError>>,
}

impl TestRouter {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        self.task.await.unwrap().unwrap();
    }
}

/// Start the router reading `source`, polling every 50ms and backing off 100ms.
pub async fn start_router(source: &Path) -> TestRouter {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.reload.source_path = Some(source.to_path_buf());
    config.reload.interval_ms = 50;
    config.reload.backoff_ms = 100;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let task = tokio::spawn(startup::serve(config, listener, shutdown.clone()));

    TestRouter {
        addr,
        shutdown,
        task,
    }
}

/// Poll `/list` until it returns `expected`, or panic after two seconds.
pub async fn wait_for_names(client: &reqwest::Client, router: &TestRouter, expected: &[&str]) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if let Ok(res) = client.get(router.url("/list")).send().await {
            if let Ok(names) = res.json::<Vec<String>>().await {
                if names == expected {
                    return;
                }
            }
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("route list never became {:?}", expected);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
