//! End-to-end tests for request handling over a real socket.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use quickserve::config::Config;
use quickserve::http::connection::Connection;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn config(root: PathBuf, hidden_files: bool, listings: bool, no_cache: bool) -> Arc<Config> {
    Arc::new(Config {
        listen: "127.0.0.1:0".parse().unwrap(),
        root,
        hidden_files,
        listings,
        logging: false,
        no_cache,
    })
}

/// Root with `about.html`, `secret/.env`, and `docs/guide.txt` (no index).
fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("about.html"), "<h1>about</h1>").unwrap();
    fs::create_dir(dir.path().join("secret")).unwrap();
    fs::write(dir.path().join("secret/.env"), "KEY=1").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/guide.txt"), "guide").unwrap();
    dir
}

/// Serves exactly one connection and returns the raw response text.
async fn send_request(cfg: Arc<Config>, raw: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut conn = Connection::new(socket, cfg);
        let _ = conn.run().await;
    });

    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(raw.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    server.await.unwrap();

    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn test_extensionless_request_serves_html_file() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response = send_request(cfg, "GET /about HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html"));
    assert!(response.ends_with("<h1>about</h1>"));
}

#[tokio::test]
async fn test_hidden_file_request_is_forbidden() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response =
        send_request(cfg, "GET /secret/.env HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 403 Forbidden\r\n"));
}

#[tokio::test]
async fn test_hidden_file_served_when_allowed() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), true, false, false);

    let response =
        send_request(cfg, "GET /secret/.env HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.ends_with("KEY=1"));
}

#[tokio::test]
async fn test_missing_path_is_not_found() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response = send_request(cfg, "GET /missing HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_directory_without_index_404_when_listings_disabled() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response = send_request(cfg, "GET /docs/ HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_directory_listed_when_listings_enabled() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, true, false);

    let response = send_request(cfg, "GET /docs/ HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("guide.txt"));
}

#[tokio::test]
async fn test_head_request_omits_body() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response = send_request(cfg, "HEAD /about HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 14"));
    assert!(response.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let response = send_request(
        cfg,
        "POST /about HTTP/1.1\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(response.contains("Allow: GET, HEAD"));
}

#[tokio::test]
async fn test_keep_alive_serves_second_request() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut conn = Connection::new(socket, cfg);
        let _ = conn.run().await;
    });

    let mut client = TcpStream::connect(addr).await.unwrap();

    // First request: HTTP/1.1 default keep-alive, connection stays open
    client
        .write_all(b"GET /about HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let mut first = Vec::new();
    let mut chunk = [0u8; 1024];
    while !String::from_utf8_lossy(&first).contains("<h1>about</h1>") {
        let n = client.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before first response completed");
        first.extend_from_slice(&chunk[..n]);
    }
    assert!(String::from_utf8_lossy(&first).starts_with("HTTP/1.1 200 OK\r\n"));

    // Second request on the same socket
    client
        .write_all(b"GET /missing HTTP/1.1\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut second = Vec::new();
    client.read_to_end(&mut second).await.unwrap();
    server.await.unwrap();

    assert!(String::from_utf8_lossy(&second).starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_pipelined_requests_both_answered() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, false);

    // Both requests arrive in one write; the buffer must stay aligned
    // across the consumed bytes of the first
    let response = send_request(
        cfg,
        "GET /about HTTP/1.1\r\nHost: localhost\r\n\r\n\
         GET /missing HTTP/1.1\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("<h1>about</h1>HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn test_no_cache_header_applied_when_configured() {
    let site = site();
    let cfg = config(site.path().to_path_buf(), false, false, true);

    let response = send_request(cfg, "GET /about HTTP/1.1\r\nConnection: close\r\n\r\n").await;

    assert!(response.contains("Cache-Control: no-cache"));
}
