use unsaid_provider::{GeminiProvider, GenerateRequest, GenerativeProvider, ProviderError};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_gemini_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
    })
}

fn analysis_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        model: "gemini-2.5-pro".into(),
        prompt: prompt.into(),
        temperature: 0.7,
        max_output_tokens: 8192,
    }
}

#[tokio::test]
async fn generate_sends_key_and_generation_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {"maxOutputTokens": 8192}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_gemini_response("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let resp = provider.generate(analysis_request("hello")).await.unwrap();

    assert_eq!(resp.text, "ok");
    assert_eq!(resp.input_tokens, Some(10));
    assert_eq!(resp.output_tokens, Some(5));
}

#[tokio::test]
async fn generate_surfaces_upstream_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": {"message": "quota exceeded"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let err = provider
        .generate(analysis_request("hello"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_rejects_body_without_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let err = provider
        .generate(analysis_request("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse));
}
