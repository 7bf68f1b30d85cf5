//! Backlog fetch against a one-shot HTTP responder.
//!
//! The responder reads a single request head, records it, and answers with a
//! canned status and body before closing the connection.

#![allow(clippy::unwrap_used)]

use parlor_client::{BacklogError, ChatEvent, RoomId, TransportConfig, fetch_backlog};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serve one request and return its head (request line and headers).
async fn respond_once(status: &'static str, body: &'static str) -> (TransportConfig, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = TransportConfig::new(listener.local_addr().unwrap().to_string());

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.ends_with(b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        String::from_utf8(head).unwrap()
    });

    (config, server)
}

#[tokio::test]
async fn backlog_is_fetched_with_token_in_order() {
    let body = r#"[{"content":"first","user":{"id":1,"username":"carol"}},{"content":"second","user":{"id":2,"username":"dave"}}]"#;
    let (config, server) = respond_once("200 OK", body).await;
    let room = RoomId::new("lobby").unwrap();

    let events = fetch_backlog(&reqwest::Client::new(), &config, &room, "secret").await.unwrap();
    let head = server.await.unwrap().to_ascii_lowercase();

    assert!(head.starts_with("get /rooms/lobby/messages http/1.1"), "{head}");
    assert!(head.contains("authorization: secret"), "{head}");
    assert_eq!(events, vec![
        ChatEvent::backlog_message("carol", "first"),
        ChatEvent::backlog_message("dave", "second"),
    ]);
}

#[tokio::test]
async fn error_status_is_reported() {
    let (config, server) = respond_once("401 Unauthorized", "{}").await;
    let room = RoomId::new("lobby").unwrap();

    let result = fetch_backlog(&reqwest::Client::new(), &config, &room, "wrong").await;
    server.await.unwrap();

    assert!(matches!(result, Err(BacklogError::Status(401))));
}

#[tokio::test]
async fn non_array_body_is_a_protocol_error() {
    let (config, server) = respond_once("200 OK", r#"{"messages":[]}"#).await;
    let room = RoomId::new("lobby").unwrap();

    let result = fetch_backlog(&reqwest::Client::new(), &config, &room, "secret").await;
    server.await.unwrap();

    assert!(matches!(result, Err(BacklogError::Protocol(_))));
}
