//! Gemini client and describer tests against a local mock of the
//! `generateContent` endpoint.

#[cfg(all(test, feature = "gemini"))]
mod gemini_mock_tests {
    use httpmock::prelude::*;
    use rdescribe::{
        ApiErrorKind, GeminiClient, GeminiModel, MediaFile, ProductDescriber, RDescribeError,
        VisionClient,
    };
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new("test-key")
            .expect("client should build")
            .model(GeminiModel::Gemini25Flash)
            .base_url(server.url("/v1beta"))
    }

    fn reply_body(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_sends_prompt_and_inline_image() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE_PATH)
                    .header("x-goog-api-key", "test-key")
                    .body_contains("\"inline_data\"")
                    .body_contains("\"mime_type\":\"image/png\"")
                    .body_contains("\"data\":\"YWJj\"")
                    .body_contains("Describe this");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(reply_body(&["- **Title**: ", "Rust Logo"]));
            })
            .await;

        let text = client_for(&server)
            .generate_with_media("Describe this", &[MediaFile::from_bytes(b"abc", "image/png")])
            .await
            .expect("request should succeed");

        mock.assert_async().await;
        assert_eq!(text, "- **Title**: Rust Logo");
    }

    #[tokio::test]
    async fn test_describe_end_to_end() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("1717000000_boots.jpg");
        std::fs::write(&image_path, b"jpeg-bytes").unwrap();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE_PATH)
                    .body_contains("\"mime_type\":\"image/jpeg\"")
                    .body_contains("SEO-optimized");
                then.status(200).json_body(reply_body(&[
                    "- **Title**: Leather Chelsea Boots\n- **Material**: Full-grain leather\n- **Image**: hallucinated.png",
                ]));
            })
            .await;

        let describer = ProductDescriber::new(client_for(&server));
        let record = describer
            .describe(image_path.to_str().unwrap())
            .await
            .expect("describe should succeed");

        mock.assert_async().await;
        assert_eq!(
            record.to_json().unwrap(),
            r#"{"Image":"../../upload/1717000000_boots.jpg","Title":"Leather Chelsea Boots","Material":"Full-grain leather"}"#
        );
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200)
                    .json_body(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
            })
            .await;

        let text = client_for(&server)
            .generate("hello")
            .await
            .expect("empty reply should pass through");
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200)
                    .json_body(json!({ "promptFeedback": { "blockReason": "OTHER" } }));
            })
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert!(matches!(
            err,
            RDescribeError::ApiError {
                kind: ApiErrorKind::UnexpectedResponse { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(429)
                    .json_body(json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" } }));
            })
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert_eq!(
            err,
            RDescribeError::api_error("Gemini", ApiErrorKind::RateLimited)
        );
    }

    #[tokio::test]
    async fn test_bad_key() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(403).body("API key not valid");
            })
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert_eq!(
            err,
            RDescribeError::api_error("Gemini", ApiErrorKind::AuthenticationFailed)
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(reply_body(&["late"]));
            })
            .await;

        let err = client_for(&server)
            .timeout(Duration::from_millis(100))
            .generate("hello")
            .await
            .unwrap_err();
        assert_eq!(err, RDescribeError::Timeout);
    }

    #[tokio::test]
    async fn test_api_key_stays_out_of_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH).query_param_exists("key");
                then.status(500);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).json_body(reply_body(&["ok"]));
            })
            .await;

        let text = client_for(&server).generate("hello").await.unwrap();
        assert_eq!(text, "ok");
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_connection_error_does_not_expose_api_key() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = GeminiClient::new("SECRET-KEY-123")
            .unwrap()
            .base_url(format!("http://127.0.0.1:{}/v1beta", port))
            .generate("hi")
            .await
            .unwrap_err();

        assert!(matches!(err, RDescribeError::HttpError(_)));
        let message = err.to_string();
        assert!(!message.contains("SECRET-KEY-123"), "{}", message);
        assert!(!format!("{:?}", err).contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn test_unreadable_image_never_reaches_api() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).json_body(reply_body(&["Title: x"]));
            })
            .await;

        let describer = ProductDescriber::new(client_for(&server));
        let err = describer
            .describe("/no/such/dir/missing.png")
            .await
            .unwrap_err();

        assert!(matches!(err, RDescribeError::InvalidInput(_)));
        mock.assert_hits_async(0).await;
    }
}
