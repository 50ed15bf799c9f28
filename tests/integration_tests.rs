//! Integration tests for the machine translation gateway
//!
//! These tests run the HTTP router against a mocked LibreTranslate server
//! and exercise the full path: host locale codes in, provider calls out,
//! host locale codes back.

use std::sync::Arc;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use mt_gateway::config::Config;
use mt_gateway::server::{router, AppState, AutoFillReply, AvailabilityReply, TranslateReply};
use mt_gateway::{LanguageDescriptor, LibreTranslateClient};

// ==================== Test Helpers ====================

fn create_test_config(provider_url: &str, api_key: Option<&str>) -> Config {
    Config {
        libretranslate_url: provider_url.to_string(),
        libretranslate_api_key: None,
        default_source_lang: "en".to_string(),
        api_key: api_key.map(str::to_string),
        port: 0,
    }
}

/// Start the gateway on an ephemeral port and return its base URL
async fn spawn_gateway(config: Config) -> String {
    let client = LibreTranslateClient::from_config(&config);
    let state = AppState::new(Arc::new(config), Arc::new(client));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Gateway server failed");
    });

    format!("http://{}", addr)
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health_endpoint() {
    let provider = MockServer::start().await;
    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::get(format!("{}/health", gateway)).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_provider_health_reports_available() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let reply: AvailabilityReply = reqwest::get(format!("{}/machine-translate/health", gateway))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reply.available);
}

#[tokio::test]
async fn test_provider_health_reports_unavailable_when_unreachable() {
    let gateway = spawn_gateway(create_test_config("http://127.0.0.1:9", None)).await;

    let response = reqwest::get(format!("{}/machine-translate/health", gateway))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let reply: AvailabilityReply = response.json().await.unwrap();
    assert!(!reply.available);
}

// ==================== Languages Tests ====================

#[tokio::test]
async fn test_languages_passthrough() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"code": "en", "name": "English"},
            {"code": "zh-Hant", "name": "Chinese (Traditional)"}
        ])))
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let languages: Vec<LanguageDescriptor> =
        reqwest::get(format!("{}/machine-translate/languages", gateway))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1].code, "zh-Hant");
}

#[tokio::test]
async fn test_languages_provider_failure_is_bad_gateway() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::get(format!("{}/machine-translate/languages", gateway))
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}

// ==================== Translate Tests ====================

#[tokio::test]
async fn test_translate_maps_locale_codes_both_ways() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({
            "q": "Good morning",
            "source": "auto",
            "target": "zh-TW"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translatedText": "早安",
            "detectedLanguageSource": "zh"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let reply: TranslateReply = reqwest::Client::new()
        .post(format!("{}/machine-translate/translate", gateway))
        .json(&serde_json::json!({"text": "Good morning", "target_lang": "zh_TW"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(reply.translated_text, "早安");
    // Provider "zh" comes back as the host's default Chinese locale
    assert_eq!(reply.detected_source_lang.as_deref(), Some("zh_CN"));
}

#[tokio::test]
async fn test_translate_empty_text_is_bad_request() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/translate", gateway))
        .json(&serde_json::json!({"text": "", "target_lang": "de"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_translate_missing_field_is_bad_request_json() {
    let provider = MockServer::start().await;
    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/translate", gateway))
        .json(&serde_json::json!({"text": "Hello"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Error body should be JSON");
    assert!(body["error"].as_str().unwrap().contains("target_lang"));

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/translate", gateway))
        .json(&serde_json::json!({"target_lang": "de"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Error body should be JSON");
    assert!(body["error"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn test_translate_blank_source_falls_back_to_auto() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({
            "q": "Hello",
            "source": "auto",
            "target": "ja"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translatedText": "こんにちは"
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/translate", gateway))
        .json(&serde_json::json!({"text": "Hello", "target_lang": "ja_JP", "source_lang": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let reply: TranslateReply = response.json().await.unwrap();
    assert_eq!(reply.translated_text, "こんにちは");
}

// ==================== Auto-fill Tests ====================

#[tokio::test]
async fn test_auto_fill_end_to_end() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({"q": "Save"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translatedText": "Speichern"
        })))
        .mount(&provider)
        .await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({"q": "Cancel"})))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let reply: AutoFillReply = reqwest::Client::new()
        .post(format!("{}/machine-translate/auto-fill", gateway))
        .json(&serde_json::json!({
            "target_lang": "de_DE",
            "source_lang": "en_US",
            "entries": [
                {"key": "button.save", "source_text": "Save"},
                {"key": "button.cancel", "source_text": "Cancel"},
                {"key": "button.blank", "source_text": ""}
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(reply.summary.total, 2);
    assert_eq!(reply.summary.success_count, 1);
    assert_eq!(reply.summary.failed_count, 1);
    assert_eq!(reply.summary.message, "Auto-filled 1 of 2 entries (1 failed)");
    assert_eq!(
        reply.translations.get("button.save").map(String::as_str),
        Some("Speichern")
    );
    assert!(!reply.translations.contains_key("button.cancel"));

    // Host codes were converted before reaching the provider
    let requests = provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["source"], "en");
        assert_eq!(body["target"], "de");
    }
}

#[tokio::test]
async fn test_auto_fill_missing_target_is_bad_request() {
    let provider = MockServer::start().await;
    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/auto-fill", gateway))
        .json(&serde_json::json!({"target_lang": "", "entries": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_auto_fill_missing_target_field_is_bad_request_json() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/auto-fill", gateway))
        .json(&serde_json::json!({"entries": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(content_type.starts_with("application/json"), "got {}", content_type);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("target_lang"));
}

#[tokio::test]
async fn test_auto_fill_without_entries_reports_nothing_to_translate() {
    let provider = MockServer::start().await;
    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/auto-fill", gateway))
        .json(&serde_json::json!({"target_lang": "de"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let reply: AutoFillReply = response.json().await.unwrap();
    assert_eq!(reply.summary.total, 0);
    assert_eq!(reply.summary.message, "Nothing to translate");
}

#[tokio::test]
async fn test_auto_fill_malformed_json_is_bad_request() {
    let provider = MockServer::start().await;
    let gateway = spawn_gateway(create_test_config(&provider.uri(), None)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/machine-translate/auto-fill", gateway))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

// ==================== API Key Tests ====================

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let provider = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&provider)
        .await;

    let gateway = spawn_gateway(create_test_config(&provider.uri(), Some("s3cret"))).await;
    let client = reqwest::Client::new();

    let missing = client
        .get(format!("{}/machine-translate/languages", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 401);

    let wrong = client
        .get(format!("{}/machine-translate/languages", gateway))
        .header("X-API-Key", "wrong!")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 401);

    let ok = client
        .get(format!("{}/machine-translate/languages", gateway))
        .header("X-API-Key", "s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), 200);

    // Service health stays open
    let health = client.get(format!("{}/health", gateway)).send().await.unwrap();
    assert_eq!(health.status(), 200);
}
