use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{app::TokenStore, model::AccessToken};

use super::{ApiError, ApiRequest, ApiResult, Payload};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the backend lives. Paths are fixed per endpoint; only the base URL
/// is configurable.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `TODO_API_URL`, falling back to the local development backend.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self { base_url }
    }
}

/// Performs one network exchange per [`ApiRequest`] and normalizes whatever
/// happens into an [`ApiResult`]. Holds the token store so authorized
/// requests can fail fast before any I/O when no session exists.
pub struct Dispatcher {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl Dispatcher {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub async fn dispatch<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let token = self.resolve_token(&request).await?;

        let url = format!("{}{}", self.base_url, request.path);
        log::debug!("{} {}", request.method, url);

        let mut builder = self.http.request(request.method.clone(), &url);

        if let Some(token) = &token {
            builder = builder.bearer_auth(token.as_str());
        }

        builder = match &request.payload {
            Some(Payload::Json(body)) => builder.json(body),
            Some(Payload::Form(pairs)) => builder.form(pairs),
            None => builder,
        };

        let response = builder.send().await.map_err(ApiError::transport)?;

        Self::normalize(response).await
    }

    async fn resolve_token(&self, request: &ApiRequest) -> ApiResult<Option<AccessToken>> {
        if !request.requires_auth {
            return Ok(None);
        }

        match self.tokens.read().await? {
            Some(token) => Ok(Some(token)),
            None => Err(ApiError::NotAuthenticated),
        }
    }

    /// A response is a success only when the status is exactly 200; anything
    /// else carries its body (or status reason) as the error message.
    async fn normalize<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();

        if status != StatusCode::OK {
            log::warn!("request rejected with status {status}");

            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::rejected(status, body));
        }

        let data = response
            .json()
            .await
            .map_err(|err| ApiError::Unexpected(err.into()))?;

        Ok(data)
    }
}
