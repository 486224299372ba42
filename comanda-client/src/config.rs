//! Client configuration

/// Configuration for connecting to the back-office API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token installed on the client at construction
    pub token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout: u64,

    /// Total attempts per request (first try included)
    pub max_attempts: u32,

    /// Linear backoff base delay in milliseconds; the wait before attempt
    /// n+1 is n * base
    pub retry_base_delay_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration with default retry policy
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 10,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the total attempt count
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the linear backoff base delay
    pub fn with_retry_base_delay_ms(mut self, millis: u64) -> Self {
        self.retry_base_delay_ms = millis;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
