use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::error::{NotifyError, Result};
use crate::payload::Envelope;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// POST `envelope` to `webhook_url` with a default client.
pub async fn post_webhook(webhook_url: &str, envelope: &Envelope) -> Result<()> {
    post_webhook_with(&Client::new(), webhook_url, envelope).await
}

/// POST `envelope` once. Any status outside 2xx is an error carrying the
/// response body.
pub async fn post_webhook_with(
    client: &Client,
    webhook_url: &str,
    envelope: &Envelope,
) -> Result<()> {
    let body = envelope.to_json().map_err(NotifyError::Serialize)?;

    debug!("Url: {webhook_url}");
    debug!("Post Json Data: {}", String::from_utf8_lossy(&body));

    let request = client
        .post(webhook_url)
        .header(CONTENT_TYPE, JSON_UTF8)
        .body(body)
        .build()
        .map_err(NotifyError::Request)?;

    let response = client
        .execute(request)
        .await
        .map_err(NotifyError::Transport)?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    // `text` consumes the response, so the body is released either way.
    match response.text().await {
        Ok(body) => Err(NotifyError::Status { status, body }),
        Err(error) => Err(NotifyError::UnreadableBody { status, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::parse_fields;
    use assert_matches::assert_matches;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use reqwest::StatusCode;

    #[tokio::test]
    async fn success_on_200() {
        let server = MockServer::start_async().await;
        let envelope = Envelope::new(parse_fields("build|42"));
        let expected: serde_json::Value =
            serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();

        let hook = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/hook")
                    .header("content-type", JSON_UTF8)
                    .json_body(expected);
                then.status(200);
            })
            .await;

        post_webhook(&server.url("/hook"), &envelope).await.unwrap();
        hook.assert_async().await;
    }

    #[tokio::test]
    async fn any_2xx_is_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(299);
            })
            .await;

        let envelope = Envelope::new(parse_fields(""));
        assert!(post_webhook(&server.url("/hook"), &envelope).await.is_ok());
    }

    #[tokio::test]
    async fn failure_on_500_reports_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(500).body("server error");
            })
            .await;

        let envelope = Envelope::new(parse_fields("a|b"));
        let err = post_webhook(&server.url("/hook"), &envelope)
            .await
            .unwrap_err();

        assert_matches!(
            &err,
            NotifyError::Status { status, body }
                if *status == StatusCode::INTERNAL_SERVER_ERROR && body == "server error"
        );
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("server error"));
    }

    #[tokio::test]
    async fn redirect_status_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/hook");
                then.status(304);
            })
            .await;

        let envelope = Envelope::new(parse_fields(""));
        let err = post_webhook(&server.url("/hook"), &envelope)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_MODIFIED));
    }

    #[tokio::test]
    async fn truncated_error_body_is_unreadable() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let envelope = Envelope::new(parse_fields("a|b"));
        let body_len = envelope.to_json().unwrap().len();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Drain the whole request so closing does not reset the connection.
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let head_end = request.windows(4).position(|w| w == b"\r\n\r\n");
                if matches!(head_end, Some(end) if request.len() >= end + 4 + body_len) {
                    break;
                }
            }

            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            socket.shutdown().await.ok();
        });

        let err = post_webhook(&format!("http://{addr}/hook"), &envelope)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert_matches!(err, NotifyError::UnreadableBody { .. });
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err
            .to_string()
            .starts_with("server error: 500 Internal Server Error, failed to read response:"));
    }

    #[tokio::test]
    async fn unparseable_url_fails_before_sending() {
        let envelope = Envelope::new(parse_fields(""));
        let err = post_webhook("not a url", &envelope).await.unwrap_err();
        assert_matches!(err, NotifyError::Request(_));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let envelope = Envelope::new(parse_fields(""));
        let err = post_webhook("http://127.0.0.1:1/hook", &envelope)
            .await
            .unwrap_err();
        assert_matches!(err, NotifyError::Transport(_));
        assert!(err.to_string().starts_with("failed to send the request:"));
    }
}
