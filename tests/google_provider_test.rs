//! Google provider against a mock HTTP server
//! Run with: cargo test --test google_provider_test

mod common;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::ensure_init;
use zap_bot::application::errors::TranslationError;
use zap_bot::domain::traits::{TranslationProvider, AUTO_SOURCE};
use zap_bot::infrastructure::translation::GoogleProvider;

fn sentences(parts: &[&str]) -> serde_json::Value {
    let list: Vec<_> = parts.iter().map(|p| json!([p, "", null])).collect();
    json!([list, null, "en"])
}

#[tokio::test]
async fn test_translates_and_keeps_surrounding_whitespace() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "gtx"))
        .and(query_param("sl", "auto"))
        .and(query_param("tl", "es"))
        .and(query_param("q", "Good morning. How are you?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sentences(&["Buenos días. ", "¿Cómo estás?"])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleProvider::new().with_base_url(server.uri());
    let out = provider
        .translate("  Good morning. How are you?\n", AUTO_SOURCE, "es")
        .await
        .expect("translated");

    assert_eq!(out, "  Buenos días. ¿Cómo estás?\n");
}

#[tokio::test]
async fn test_language_names_resolve_to_codes() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sentences(&["Bonjour"])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleProvider::new().with_base_url(server.uri());
    let out = provider.translate("Hello", "English", "french").await;

    assert_eq!(out, Ok("Bonjour".to_string()));
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = GoogleProvider::new().with_base_url(server.uri());

    assert_eq!(
        provider.translate("Hello", AUTO_SOURCE, "es").await,
        Err(TranslationError::RateLimited)
    );
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let provider = GoogleProvider::new().with_base_url(server.uri());
    let result = provider.translate("Hello", AUTO_SOURCE, "es").await;

    match result {
        Err(TranslationError::Api(detail)) => assert!(detail.contains("boom")),
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = GoogleProvider::new().with_base_url(server.uri());

    assert!(matches!(
        provider.translate("Hello", AUTO_SOURCE, "es").await,
        Err(TranslationError::Parse(_))
    ));
}

#[tokio::test]
async fn test_catalog_lists_codes_with_names() {
    let provider = GoogleProvider::new();
    let catalog = provider.supported_languages().await.expect("catalog");

    assert_eq!(catalog.get("es").map(|l| l.name.as_str()), Some("spanish"));
    assert_eq!(catalog.resolve("german").map(|l| l.code.as_str()), Some("de"));
}
