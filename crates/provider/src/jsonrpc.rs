//! Minimal JSON-RPC 2.0 client over HTTP.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::ProviderError;

/// HTTP client for JSON-RPC calls.
#[derive(Clone, Debug)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
    next_id: Arc<AtomicU64>,
}

#[derive(Serialize)]
struct Request<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl JsonRpcClient {
    /// Creates a client for `url`.
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, url: url.into(), next_id: Arc::new(AtomicU64::new(1)) })
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `method` with `params` and decodes the result.
    pub async fn request<P, R>(&self, method: &str, params: P) -> Result<R, ProviderError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = Request { jsonrpc: "2.0", method, params, id };

        tracing::trace!(method, id, "rpc request");
        let resp = self.client.post(&self.url).json(&body).send().await?;
        let resp: Response = resp.json().await?;
        decode_response(method, resp)
    }
}

fn decode_response<R: DeserializeOwned>(method: &str, resp: Response) -> Result<R, ProviderError> {
    if let Some(error) = resp.error {
        // Revert reasons are carried in `data` by some nodes.
        let message = match error.data.as_ref().and_then(|d| d.as_str()) {
            Some(data) if !error.message.contains(data) => format!("{}: {}", error.message, data),
            _ => error.message,
        };
        tracing::debug!(method, code = error.code, %message, "rpc error");
        return Err(ProviderError::from_rpc(error.code, message));
    }
    let value = resp.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| ProviderError::Decode(format!("{method}: {e}")))
}
