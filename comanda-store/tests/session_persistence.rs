// comanda-store/tests/session_persistence.rs
// Persisted session: fixed keys, restore on load, full clear on logout.

use comanda_client::ClientConfig;
use comanda_store::SessionStore;
use comanda_store::session::{KEY_TENANT, KEY_TOKEN, KEY_USER};
use serde_json::Value;
use shared::models::{LoginResponse, TenantInfo, UserInfo};
use tempfile::TempDir;

fn sample_login() -> LoginResponse {
    LoginResponse {
        token: "jwt-token".to_string(),
        user: UserInfo {
            id: "u1".to_string(),
            username: "admin".to_string(),
            name: Some("Admin".to_string()),
            role: "owner".to_string(),
        },
        tenant: TenantInfo {
            id: "t1".to_string(),
            name: "Warung Comanda".to_string(),
            address: None,
            phone: None,
        },
    }
}

#[tokio::test]
async fn login_persists_under_fixed_keys() {
    let dir = TempDir::new().unwrap();
    let client = ClientConfig::new("http://localhost:9").build_client();
    let session = SessionStore::new(dir.path(), client.clone());

    session.store_login(&sample_login()).unwrap();

    assert!(session.is_logged_in());
    assert_eq!(session.token().as_deref(), Some("jwt-token"));
    assert_eq!(session.user().unwrap().username, "admin");
    assert_eq!(session.tenant().unwrap().name, "Warung Comanda");
    // the token is installed on the shared client
    assert_eq!(client.token().as_deref(), Some("jwt-token"));

    let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[KEY_TOKEN], "jwt-token");
    assert_eq!(stored[KEY_USER]["username"], "admin");
    assert_eq!(stored[KEY_TENANT]["id"], "t1");
}

#[tokio::test]
async fn load_restores_the_token_onto_the_client() {
    let dir = TempDir::new().unwrap();
    {
        let client = ClientConfig::new("http://localhost:9").build_client();
        let session = SessionStore::new(dir.path(), client);
        session.store_login(&sample_login()).unwrap();
    }

    let client = ClientConfig::new("http://localhost:9").build_client();
    assert!(client.token().is_none());
    let session = SessionStore::load(dir.path(), client.clone()).unwrap();

    assert!(session.is_logged_in());
    assert_eq!(client.token().as_deref(), Some("jwt-token"));
}

#[tokio::test]
async fn clear_removes_every_key_and_the_client_token() {
    let dir = TempDir::new().unwrap();
    let client = ClientConfig::new("http://localhost:9").build_client();
    let session = SessionStore::new(dir.path(), client.clone());
    session.store_login(&sample_login()).unwrap();

    session.clear();

    assert!(!session.is_logged_in());
    assert!(session.user().is_none());
    assert!(session.tenant().is_none());
    assert!(client.token().is_none());

    let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert!(stored.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn load_without_a_persisted_session_starts_logged_out() {
    let dir = TempDir::new().unwrap();
    let client = ClientConfig::new("http://localhost:9").build_client();
    let session = SessionStore::load(dir.path(), client.clone()).unwrap();

    assert!(!session.is_logged_in());
    assert!(client.token().is_none());
}
