//! Integration tests for the token acquisition and refresh flows.
//!
//! Upstream responses are stubbed with wiremock, so these tests verify the
//! full path: query signing, body construction, response classification,
//! and write-through to the credential store.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopee_partner_api::{
    ApiHost, AuthError, CredentialStore, EnvFilePersistence, InMemoryPersistence, PartnerConfig,
    PartnerKey, TokenClient,
};

const PARTNER_ID: u64 = 2_013_772;
const SHOP_ID: u64 = 1_306_398_160;

fn config_for(server_uri: &str, refresh_token: Option<&str>) -> PartnerConfig {
    let mut builder = PartnerConfig::builder()
        .partner_id(PARTNER_ID)
        .shop_id(SHOP_ID)
        .partner_key(PartnerKey::new("test-partner-key").unwrap())
        .api_host(ApiHost::new(server_uri).unwrap());
    if let Some(token) = refresh_token {
        builder = builder.refresh_token(token);
    }
    builder.build().unwrap()
}

fn client_for(server_uri: &str, refresh_token: Option<&str>) -> TokenClient {
    let store = Arc::new(CredentialStore::new(
        config_for(server_uri, refresh_token),
        Box::<InMemoryPersistence>::default(),
    ));
    TokenClient::new(store)
}

#[tokio::test]
async fn test_exchange_code_stores_token_pair_from_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .and(body_json(json!({
            "code": "one-time-code",
            "shop_id": SHOP_ID,
            "partner_id": PARTNER_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "",
            "message": "",
            "response": {
                "access_token": "access-1",
                "refresh_token": "refresh-1",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), None);
    let result = client.exchange_code("one-time-code").await.unwrap();

    assert_eq!(result.access_token, "access-1");
    assert_eq!(result.refresh_token, "refresh-1");
    assert_eq!(result.expire_in, None);

    // Write-through to the store
    let snapshot = client.store().read();
    assert_eq!(snapshot.access_token.as_deref(), Some("access-1"));
    assert_eq!(snapshot.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn test_exchange_code_signs_with_partner_level_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a",
            "refresh_token": "r",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), None);
    client.exchange_code("code").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query: std::collections::HashMap<String, String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert_eq!(query.get("partner_id").unwrap(), "2013772");
    assert!(query.contains_key("timestamp"));
    let sign = query.get("sign").unwrap();
    assert_eq!(sign.len(), 64);
    assert!(sign.chars().all(|c| c.is_ascii_hexdigit()));
    // A partner-level call never carries shop auth fields in the query
    assert!(!query.contains_key("access_token"));
    assert!(!query.contains_key("shop_id"));
}

#[tokio::test]
async fn test_exchange_code_error_leaves_store_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "error_auth",
            "message": "invalid code",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), None);
    let result = client.exchange_code("spent-code").await;

    match result {
        Err(AuthError::Api { code, message }) => {
            assert_eq!(code, "error_auth");
            assert_eq!(message, "invalid code");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let snapshot = client.store().read();
    assert_eq!(snapshot.access_token, None);
    assert_eq!(snapshot.refresh_token, None);
}

#[tokio::test]
async fn test_refresh_uses_stored_token_and_updates_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_json(json!({
            "refresh_token": "stored-refresh",
            "shop_id": SHOP_ID,
            "partner_id": PARTNER_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "refresh_token": "refresh-2",
            "expire_in": 14400,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Some("stored-refresh"));
    let result = client.refresh_access_token(None).await.unwrap();

    assert_eq!(result.access_token, "access-2");
    assert_eq!(result.refresh_token, "refresh-2");
    assert_eq!(result.expire_in, Some(14_400));

    let snapshot = client.store().read();
    assert_eq!(snapshot.access_token.as_deref(), Some("access-2"));
    assert_eq!(snapshot.refresh_token.as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn test_refresh_override_takes_precedence_over_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_json(json!({
            "refresh_token": "override-refresh",
            "shop_id": SHOP_ID,
            "partner_id": PARTNER_ID,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a",
            "refresh_token": "r",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Some("stored-refresh"));
    client
        .refresh_access_token(Some("override-refresh"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_classifies_stale_refresh_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "invalid_refresh_token",
            "message": "refresh token expired",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Some("stale-refresh"));
    let result = client.refresh_access_token(None).await;

    match result {
        Err(err @ AuthError::RefreshTokenStale { .. }) => {
            assert!(err.requires_reauthorization());
        }
        other => panic!("expected RefreshTokenStale, got {other:?}"),
    }

    // A failed refresh never touches the stored pair
    let snapshot = client.store().read();
    assert_eq!(snapshot.refresh_token.as_deref(), Some("stale-refresh"));
}

#[tokio::test]
async fn test_refresh_surfaces_generic_errors_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "error_server",
            "message": "internal error",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Some("stored-refresh"));
    let result = client.refresh_access_token(None).await;

    match result {
        Err(err @ AuthError::Api { .. }) => {
            assert!(!err.requires_reauthorization());
            assert!(err.to_string().contains("error_server"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_writes_through_to_env_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "persisted-access",
            "refresh_token": "persisted-refresh",
        })))
        .mount(&server)
        .await;

    let mut env_path = std::env::temp_dir();
    env_path.push(format!("shopee-write-through-{}.env", std::process::id()));
    std::fs::write(
        &env_path,
        format!(
            "PARTNER_ID={PARTNER_ID}\nSHOP_ID={SHOP_ID}\nAPI_KEY=test-partner-key\n\
             API_HOST={}\nREFRESH_TOKEN=refresh-0\n",
            server.uri()
        ),
    )
    .unwrap();

    let backend = EnvFilePersistence::new(&env_path);
    let config = backend.load().unwrap();
    let store = Arc::new(CredentialStore::new(config, Box::new(backend)));
    let client = TokenClient::new(store);

    client.refresh_access_token(None).await.unwrap();

    let content = std::fs::read_to_string(&env_path).unwrap();
    assert!(content.contains("ACCESS_TOKEN=persisted-access"));
    assert!(content.contains("REFRESH_TOKEN=persisted-refresh"));
    assert!(content.contains("API_KEY=test-partner-key"));

    std::fs::remove_file(&env_path).ok();
}

#[tokio::test]
async fn test_refresh_without_any_token_makes_no_network_call() {
    let server = MockServer::start().await;

    let client = client_for(&server.uri(), None);
    let result = client.refresh_access_token(None).await;

    assert!(matches!(result, Err(AuthError::MissingRefreshToken)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_authorization_url_points_at_configured_host() {
    let server = MockServer::start().await;
    let client = client_for(&server.uri(), None);

    let url = client.authorization_url();
    assert!(url.starts_with(&format!("{}/api/v2/shop/auth_partner?", server.uri())));
    // Building the URL is offline
    assert!(server.received_requests().await.unwrap().is_empty());
}
