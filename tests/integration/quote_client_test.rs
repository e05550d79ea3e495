//! Integration tests for the quote API client against a local HTTP server

use price_alert::quote::{QuoteClient, QuoteClientConfig, QuoteSource};
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP response and return the raw request it received
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/api/v1", addr), handle)
}

fn client(base_url: String) -> QuoteClient {
    let mut config = QuoteClientConfig::new("BINANCE:BTCUSDT", "test-key");
    config.base_url = base_url;
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    QuoteClient::with_http_client(config, http)
}

#[tokio::test]
async fn test_fetch_quote_success() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"c":91000,"d":500,"dp":0.55,"h":92000,"l":89000,"o":90500,"pc":90500,"t":1735689600}"#,
    )
    .await;

    let quote = client(url).fetch_quote().await.unwrap();
    assert_eq!(quote.current_price, dec!(91000));
    assert_eq!(quote.change, dec!(500));
    assert_eq!(quote.percent_change, dec!(0.55));
    assert_eq!(quote.high_price, dec!(92000));
    assert_eq!(quote.low_price, dec!(89000));
    assert_eq!(quote.timestamp, 1735689600);

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/v1/quote?"));
    assert!(request_line.contains("symbol=BINANCE%3ABTCUSDT"));
    assert!(request_line.contains("token=test-key"));
}

#[tokio::test]
async fn test_fetch_explicit_symbol_and_key() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"c":3100.5,"d":-12.25,"dp":-0.39,"h":3150,"l":3080,"o":3112.75,"pc":3112.75,"t":1735689600}"#,
    )
    .await;

    let quote = client(url).fetch("ETHUSD", "other-key").await.unwrap();
    assert_eq!(quote.current_price, dec!(3100.5));
    assert_eq!(quote.change, dec!(-12.25));

    let request = server.await.unwrap();
    assert!(request.contains("symbol=ETHUSD"));
    assert!(request.contains("token=other-key"));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let (url, _server) = serve_once("401 Unauthorized", r#"{"error":"Invalid API key."}"#).await;

    let err = client(url).fetch_quote().await.unwrap_err();
    assert!(err.is_network());
    let msg = err.to_string();
    assert!(msg.contains("401"));
    assert!(msg.contains("Invalid API key."));
}

#[tokio::test]
async fn test_missing_current_price_is_decode_error() {
    let (url, _server) = serve_once(
        "200 OK",
        r#"{"d":500,"dp":0.55,"h":92000,"l":89000,"o":90500,"pc":90500,"t":1735689600}"#,
    )
    .await;

    let err = client(url).fetch_quote().await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (url, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

    let err = client(url).fetch_quote().await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_connection_refused_is_network_error_without_token() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/api/v1", addr))
        .fetch_quote()
        .await
        .unwrap_err();
    assert!(err.is_network());
    assert!(!err.to_string().contains("test-key"));
}
