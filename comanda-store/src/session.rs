//! Persisted session
//!
//! Token, user and tenant records stored under fixed keys in a JSON file,
//! cleared together on logout. The store also owns installing the token
//! on the shared HTTP client so every service picks it up immediately.

use comanda_client::{AuthService, ClientError, HttpClient};
use serde_json::Value;
use shared::models::{LoginResponse, TenantInfo, UserInfo};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Storage key for the bearer token
pub const KEY_TOKEN: &str = "auth_token";
/// Storage key for the serialized user record
pub const KEY_USER: &str = "auth_user";
/// Storage key for the serialized tenant record
pub const KEY_TENANT: &str = "auth_tenant";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Session persistence plus token installation on the shared client
pub struct SessionStore {
    file_path: PathBuf,
    http: HttpClient,
    data: Mutex<BTreeMap<String, Value>>,
}

impl SessionStore {
    /// Create an empty session store writing to `{dir}/session.json`.
    pub fn new(storage_dir: &Path, http: HttpClient) -> Self {
        Self {
            file_path: storage_dir.join("session.json"),
            http,
            data: Mutex::new(BTreeMap::new()),
        }
    }

    /// Load a persisted session if one exists, reinstalling its token on
    /// the client.
    pub fn load(storage_dir: &Path, http: HttpClient) -> Result<Self, SessionError> {
        let file_path = storage_dir.join("session.json");
        let data: BTreeMap<String, Value> = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        if let Some(token) = data.get(KEY_TOKEN).and_then(Value::as_str) {
            http.set_token(token);
            tracing::info!("restored persisted session token");
        }

        Ok(Self {
            file_path,
            http,
            data: Mutex::new(data),
        })
    }

    fn save(&self, data: &BTreeMap<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    /// Log in and persist the result.
    pub async fn login(
        &self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, SessionError> {
        let login = auth.login(username, password).await?;
        self.store_login(&login)?;
        tracing::info!(username = %login.user.username, "logged in");
        Ok(login)
    }

    /// Persist a login result and install its token on the client.
    pub fn store_login(&self, login: &LoginResponse) -> Result<(), SessionError> {
        let mut data = self.data.lock().expect("session lock poisoned");
        data.insert(KEY_TOKEN.to_string(), Value::String(login.token.clone()));
        data.insert(KEY_USER.to_string(), serde_json::to_value(&login.user)?);
        data.insert(KEY_TENANT.to_string(), serde_json::to_value(&login.tenant)?);
        self.save(&data)?;
        self.http.set_token(&login.token);
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.data
            .lock()
            .expect("session lock poisoned")
            .get(KEY_TOKEN)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.data
            .lock()
            .expect("session lock poisoned")
            .get(KEY_USER)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn tenant(&self) -> Option<TenantInfo> {
        self.data
            .lock()
            .expect("session lock poisoned")
            .get(KEY_TENANT)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Remove every persisted key and the client token. Best-effort on the
    /// file side so a forced logout always succeeds in memory.
    pub fn clear(&self) {
        let mut data = self.data.lock().expect("session lock poisoned");
        data.clear();
        if let Err(e) = self.save(&data) {
            tracing::warn!(error = %e, "failed to persist session clear");
        }
        self.http.clear_token();
        tracing::info!("session cleared");
    }
}
