//! # Generic JSON Client
//!
//! `Api` joins request paths onto a base URL, sends JSON and decodes JSON.
//! It is the only place that turns a non-2xx status into an error.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Envelope of list endpoints: `{ "total": n, "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub total: u64,
    pub items: Vec<T>,
}

/// Body shape of a rejected request.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Base HTTP client. Paths are appended verbatim to `base_url`.
#[derive(Debug, Clone)]
pub struct Api {
    base_url: String,
    http: Client,
}

impl Api {
    /// Creates a client for `base_url`, which must be an absolute URL.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Same as [`Api::new`] with a caller-supplied reqwest client.
    pub fn with_client(base_url: impl Into<String>, http: Client) -> ApiResult<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)?;
        Ok(Api {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}{uri}` decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> ApiResult<T> {
        let url = self.url(uri);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// `GET {base}/{segments...}` decoded as `T`. Each segment is
    /// percent-encoded, so ids may contain `/`, `?` or `#`.
    pub async fn get_segments<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.segments_url(segments)?;
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// `POST {base}{uri}` with a JSON body, decoded as `T`.
    pub async fn post<B, T>(&self, uri: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(uri);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    fn url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }

    fn segments_url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Decodes a 2xx body, or extracts the server's message from anything else.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let fallback = status.canonical_reason().unwrap_or("Unknown error").to_string();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or(fallback);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
