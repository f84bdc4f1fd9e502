use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::ClientConfig;
use shared_models::ApiError;

/// JSON-over-HTTP client for the hospital REST server.
#[derive(Debug, Clone)]
pub struct HospitalApiClient {
    client: Client,
    base_url: String,
}

impl HospitalApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where T: DeserializeOwned {
        self.request_with_fallback(method, path, body, None).await
    }

    /// Sends one request and decodes a 2xx JSON body into `T`.
    ///
    /// Non-2xx responses become `ApiError::Status` carrying the body's
    /// `message`/`error` field, or `fallback` (default "Server error: <code>")
    /// when the body has neither.
    pub async fn request_with_fallback<T>(&self, method: Method, path: &str,
                                          body: Option<Value>, fallback: Option<&str>)
                                          -> Result<T, ApiError>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url)
            .headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("API error ({}): {}", status, text);
            let fallback = fallback
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            return Err(ApiError::from_status_body(status.as_u16(), &text, &fallback));
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            error!("Could not decode response from {}: {}", url, e);
            ApiError::UnexpectedShape(e.to_string())
        })
    }
}
