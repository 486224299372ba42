//! Auth service

use crate::{ClientResult, HttpClient};
use shared::models::{LoginRequest, LoginResponse};

const LOGIN_PATH: &str = "users/login";

/// Facade over `/users/login`
#[derive(Debug, Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token plus the user and tenant records.
    ///
    /// Token installation is the session store's job; this call only
    /// performs the exchange.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.http.post(LOGIN_PATH, &request).await
    }
}
