//! Tests for the OpenAI client against a one-shot local HTTP server.

use futures_util::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use ina_sql_prompter::{ClientConfig, CompletionClient, Credential, OpenAiClient};

/// Serves a single canned response and returns the raw request it received.
async fn serve_once(status_line: &'static str, body: String) -> (ClientConfig, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n{body}"
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request
    });

    let config = ClientConfig {
        base_url: format!("http://{addr}/v1"),
    };
    (config, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8(buf).expect("utf-8 request")
}

fn sse_chunk(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "choices": [{ "index": 0, "delta": { "content": content }, "finish_reason": null }]
        })
    )
}

fn credential() -> Credential {
    Credential::new("sk-test-key").expect("credential")
}

#[tokio::test]
async fn test_streams_fragments_from_sse_body() {
    let body = format!(
        "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"role\":\"assistant\",\"content\":\"\"}}}}]}}\n\n{}{}data: [DONE]\n\n",
        sse_chunk("SELECT "),
        sse_chunk("condition_type__c")
    );
    let (config, server) = serve_once("200 OK", body).await;
    let client = OpenAiClient::new(&config);

    let stream = client
        .stream(&credential(), "schema and question")
        .await
        .expect("stream");
    let fragments: Vec<String> = stream
        .map(|item| item.expect("fragment"))
        .collect()
        .await;

    assert_eq!(fragments, vec!["SELECT ", "condition_type__c"]);

    let request = server.await.expect("server task");
    let lower = request.to_lowercase();
    assert!(lower.starts_with("post /v1/chat/completions "));
    assert!(lower.contains("authorization: bearer sk-test-key"));

    let body_start = request.find("\r\n\r\n").expect("request body") + 4;
    let payload: serde_json::Value =
        serde_json::from_str(&request[body_start..]).expect("json payload");
    assert_eq!(
        payload,
        serde_json::json!({
            "model": "gpt-4o",
            "messages": [{ "role": "user", "content": "schema and question" }],
            "stream": true,
        })
    );
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let body = r#"{"error":{"message":"Incorrect API key provided: sk-test-key.","type":"invalid_request_error","code":"invalid_api_key"}}"#;
    let (config, server) = serve_once("401 Unauthorized", body.to_string()).await;
    let client = OpenAiClient::new(&config);

    let err = match client.stream(&credential(), "prompt").await {
        Ok(_) => panic!("expected authentication error"),
        Err(e) => e,
    };

    assert!(err.is_authentication());
    assert_eq!(
        err.to_string(),
        "Authentication error: Incorrect API key provided: sk-test-key."
    );
    server.await.expect("server task");
}

#[tokio::test]
async fn test_server_error_is_request_error() {
    let (config, server) = serve_once("500 Internal Server Error", "oops".to_string()).await;
    let client = OpenAiClient::new(&config);

    let err = match client.stream(&credential(), "prompt").await {
        Ok(_) => panic!("expected request error"),
        Err(e) => e,
    };

    assert!(err.is_request());
    assert!(err.to_string().contains("500"));
    server.await.expect("server task");
}

#[tokio::test]
async fn test_truncated_stream_ends_with_request_error() {
    let (config, server) = serve_once("200 OK", sse_chunk("SELECT ")).await;
    let client = OpenAiClient::new(&config);

    let items: Vec<_> = client
        .stream(&credential(), "prompt")
        .await
        .expect("stream")
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().expect("fragment"), "SELECT ");
    assert!(items[1].as_ref().unwrap_err().is_request());
    server.await.expect("server task");
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = OpenAiClient::new(&ClientConfig {
        base_url: format!("http://{addr}/v1"),
    });

    let err = match client.stream(&credential(), "prompt").await {
        Ok(_) => panic!("expected request error"),
        Err(e) => e,
    };
    assert!(err.is_request());
}
