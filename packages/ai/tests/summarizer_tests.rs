// ABOUTME: HTTP summarizer tests against a mock text-generation server

use dayboard_ai::{HttpSummarizer, Summarizer, SummaryError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_summarize_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({ "prompt": "hello" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": "  On track.\n" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let summarizer =
        HttpSummarizer::new(format!("{}/generate", server.uri()), Some("test-key".into())).unwrap();

    let text = summarizer.summarize("hello").await.unwrap();
    assert_eq!(text, "On track.");
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let summarizer = HttpSummarizer::new(server.uri(), None).unwrap();

    match summarizer.summarize("hello").await {
        Err(SummaryError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "   " })),
        )
        .mount(&server)
        .await;

    let summarizer = HttpSummarizer::new(server.uri(), None).unwrap();

    assert!(matches!(
        summarizer.summarize("hello").await,
        Err(SummaryError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let summarizer = HttpSummarizer::new(server.uri(), None).unwrap();

    assert!(matches!(
        summarizer.summarize("hello").await,
        Err(SummaryError::ParseError(_))
    ));
}
