use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("response was not a JSON array: {0}")]
    Decode(String),
}

/// Reads the full dataset from the query service.
#[derive(Clone)]
pub struct DataClient {
    http: reqwest::Client,
    url: String,
}

impl DataClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One `GET` of the dump endpoint. Any non-2xx status is an error,
    /// including the service's "No data found" 404.
    pub async fn fetch_all(&self) -> Result<Vec<Value>, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        match body {
            Value::Array(items) => {
                info!(count = items.len(), url = %self.url, "Fetched city data");
                Ok(items)
            }
            other => Err(FetchError::Decode(format!("expected array, got {}", kind(&other)))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
