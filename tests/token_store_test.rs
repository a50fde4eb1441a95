mod common;

use playcli::{PlayError, management::TokenStore, types::Token};
use tempfile::TempDir;

use common::{expired_token, valid_token};

fn store_in(dir: &TempDir) -> TokenStore {
    TokenStore::new(dir.path().join("spotify_token.json"))
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let token = valid_token();

    store.save(&token).await.unwrap();
    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, token);

    // Saving the decoded value again produces the same record
    let first = std::fs::read_to_string(store.path()).unwrap();
    store.save(&loaded).await.unwrap();
    let second = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_load_missing_file_is_not_logged_in() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, PlayError::NotLoggedIn { .. }));
    assert!(err.is_graceful());
}

#[tokio::test]
async fn test_load_garbage_is_not_logged_in() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ not json").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, PlayError::NotLoggedIn { .. }));
}

#[tokio::test]
async fn test_save_overwrites_previous_token() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut long_token = valid_token();
    long_token.access_token = "a".repeat(512);
    store.save(&long_token).await.unwrap();

    let replacement = expired_token();
    store.save(&replacement).await.unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let decoded: Token = serde_json::from_str(&content).unwrap();
    assert_eq!(decoded, replacement);
    assert!(!content.contains(&long_token.access_token));
}

#[tokio::test]
async fn test_token_file_fields() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&valid_token()).await.unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(value["access_token"], "access-1");
    assert_eq!(value["token_type"], "Bearer");
    assert_eq!(value["refresh_token"], "refresh-1");
    assert!(value["expiry"].is_string());
}

#[cfg(unix)]
#[tokio::test]
async fn test_token_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // Pre-existing world-readable file gets tightened too
    std::fs::write(store.path(), "old").unwrap();
    std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

    store.save(&valid_token()).await.unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_token_expiry() {
    use chrono::Duration;

    assert!(!valid_token().is_expired(Duration::seconds(60)));
    assert!(expired_token().is_expired(Duration::seconds(60)));
    // Within the leeway counts as expired
    assert!(valid_token().is_expired(Duration::hours(2)));
}
