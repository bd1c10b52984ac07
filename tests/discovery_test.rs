mod common;

use common::{client_for, config_for, NoKeys, TEST_KEY};
use llm_sambanova::{
    discover, register_models, try_discover, Error, MemoryKeyStore, ModelDescriptor,
    ModelRegistry, SambaNovaClient, SambaNovaConfig,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_discover_returns_models_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "a", "object": "model"},
                {"id": "b", "object": "model"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let models = discover(&client_for(&mock_server), Some(TEST_KEY)).await;

    assert_eq!(
        models,
        vec![ModelDescriptor::new("a"), ModelDescriptor::new("b")]
    );
}

#[tokio::test]
async fn test_discover_without_key_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "a"}]})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(discover(&client, None).await.is_empty());
    assert!(discover(&client, Some("")).await.is_empty());
}

#[tokio::test]
async fn test_discover_swallows_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(discover(&client, Some(TEST_KEY)).await.is_empty());

    match try_discover(&client, TEST_KEY).await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("Expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_discover_swallows_malformed_payload() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(discover(&client, Some(TEST_KEY)).await.is_empty());
    assert!(matches!(
        try_discover(&client, TEST_KEY).await,
        Err(Error::Serialization(_))
    ));
}

#[tokio::test]
async fn test_discover_swallows_unexpected_shape() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": ["a"]})))
        .mount(&mock_server)
        .await;

    assert!(discover(&client_for(&mock_server), Some(TEST_KEY))
        .await
        .is_empty());
}

#[tokio::test]
async fn test_discover_swallows_connection_failure() {
    let config = SambaNovaConfig::new().with_api_base("http://127.0.0.1:1/v1");
    let client = SambaNovaClient::new(config).unwrap();

    assert!(discover(&client, Some(TEST_KEY)).await.is_empty());
    assert!(matches!(
        try_discover(&client, TEST_KEY).await,
        Err(Error::Http(_))
    ));
}

#[tokio::test]
async fn test_register_models_registers_two_models_per_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("Authorization", "Bearer stored-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "Meta-Llama-3.3-70B-Instruct"}, {"id": "DeepSeek-R1"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let keys = MemoryKeyStore::new().with_key("sambanova", "stored-key");
    let mut registry = ModelRegistry::new();
    register_models(&config_for(&mock_server), &keys, &mut |model| {
        registry.register(model)
    })
    .await
    .unwrap();

    let ids: Vec<&str> = registry.models().map(|model| model.model_id()).collect();
    assert_eq!(
        ids,
        vec![
            "sambanova/Meta-Llama-3.3-70B-Instruct",
            "sambanova/Meta-Llama-3.3-70B-Instruct-completion",
            "sambanova/DeepSeek-R1",
            "sambanova/DeepSeek-R1-completion",
        ]
    );

    for model in registry.models() {
        assert!(model.to_string().starts_with("SambaNova: sambanova/"));
        assert_eq!(model.key_requirement().key_name, "sambanova");
    }
    let chat = registry.get("sambanova/DeepSeek-R1").unwrap();
    assert_eq!(chat.model_name(), "DeepSeek-R1");
}

#[tokio::test]
async fn test_register_models_without_key_registers_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "a"}]})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut registry = ModelRegistry::new();
    register_models(&config_for(&mock_server), &NoKeys, &mut |model| {
        registry.register(model)
    })
    .await
    .unwrap();

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_register_models_after_failed_discovery_registers_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad key"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let keys = MemoryKeyStore::new().with_key("sambanova", "wrong-key");
    let mut registry = ModelRegistry::new();
    register_models(&config_for(&mock_server), &keys, &mut |model| {
        registry.register(model)
    })
    .await
    .unwrap();

    assert!(registry.is_empty());
}
