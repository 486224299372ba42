//! Transaction service
//!
//! Read-only: the nested session report is fetched and flattened; there
//! are no mutations.

use crate::{ClientError, ClientResult, HttpClient};
use shared::models::{SessionWire, Transaction, flatten_sessions};
use shared::response::extract_list;

const REPORT_PATH: &str = "payments/grouped/sessions/details";

/// Facade over the grouped payments report
#[derive(Debug, Clone)]
pub struct TransactionService {
    http: HttpClient,
}

impl TransactionService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch the nested session report and flatten it into one record per
    /// (session, payment) pair.
    pub async fn list(&self) -> ClientResult<Vec<Transaction>> {
        let payload = self.http.get_json(REPORT_PATH, &[]).await?;
        let (items, _) = extract_list(&payload)?;
        let sessions = items
            .into_iter()
            .map(serde_json::from_value::<SessionWire>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(flatten_sessions(sessions))
    }
}
