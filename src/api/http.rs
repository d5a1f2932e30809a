//! HTTP implementation of the backend trait
//!
//! Speaks either of the two path conventions the backend exposes:
//!
//! - flat: `/{collection}`, `/{collection}/{id}`, `/{collection}/{id}/{action}`
//! - versioned: `/v1/{Controller}/{Action}?id={id}`
//!
//! The caller identity rides on every request as opaque headers; this layer
//! neither generates nor validates it. No retries and no backoff: a failed
//! request is recorded and surfaced as-is.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use async_trait::async_trait;

use crate::api::{ApiError, BackendApi};
use crate::core::config::{PathStyle, SyncConfig};
use crate::core::kind::EntityKind;

const OPERATOR_HEADER: &str = "x-operator-id";
const ROLE_HEADER: &str = "x-role-id";
const SESSION_HEADER: &str = "x-session-id";

/// `reqwest`-backed implementation of [`BackendApi`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    path_style: PathStyle,
}

impl HttpBackend {
    /// Build a backend client from the sync configuration
    pub fn new(config: &SyncConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(operator_id) = &config.identity.operator_id {
            headers.insert(OPERATOR_HEADER, header_value(operator_id)?);
        }
        if let Some(role_id) = &config.identity.role_id {
            headers.insert(ROLE_HEADER, header_value(role_id)?);
        }
        headers.insert(SESSION_HEADER, header_value(&config.identity.session_id)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            path_style: config.path_style,
        })
    }

    fn url(&self, kind: EntityKind, id: Option<&str>, action: &str) -> String {
        match self.path_style {
            PathStyle::Flat => flat_url(&self.base_url, kind, id, action),
            PathStyle::Versioned => versioned_url(&self.base_url, kind, id, action),
        }
    }

    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response.json().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        let url = self.url(kind, None, "List");
        tracing::debug!(%kind, %url, "listing collection");
        let body = self.send_json(self.client.get(&url), &url).await?;
        match body {
            Value::Array(records) => Ok(records),
            other => Err(ApiError::Decode {
                url,
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        let url = self.url(kind, Some(id), "Get");
        self.send_json(self.client.get(&url), &url).await
    }

    async fn create(&self, kind: EntityKind, payload: Value) -> Result<Value, ApiError> {
        let url = self.url(kind, None, "Create");
        tracing::debug!(%kind, %url, "creating record");
        self.send_json(self.client.post(&url).json(&payload), &url)
            .await
    }

    async fn update(&self, kind: EntityKind, id: &str, payload: Value) -> Result<Value, ApiError> {
        let url = self.url(kind, Some(id), "Update");
        tracing::debug!(%kind, %url, "updating record");
        self.send_json(self.client.patch(&url).json(&payload), &url)
            .await
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ApiError> {
        let url = self.url(kind, Some(id), "Delete");
        tracing::debug!(%kind, %url, "deleting record");
        self.send_json(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn record_action(
        &self,
        kind: EntityKind,
        id: &str,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError> {
        let url = match self.path_style {
            PathStyle::Flat => format!(
                "{}/{}/{}/{}",
                self.base_url,
                kind.collection(),
                id,
                action
            ),
            PathStyle::Versioned => versioned_url(
                &self.base_url,
                kind,
                Some(id),
                &kebab_to_pascal(action),
            ),
        };
        tracing::debug!(%kind, %action, %url, "record action");
        self.send_json(self.client.post(&url).json(&payload), &url)
            .await
    }

    async fn collection_action(
        &self,
        kind: EntityKind,
        action: &str,
        payload: Value,
    ) -> Result<Value, ApiError> {
        let url = match self.path_style {
            PathStyle::Flat => format!("{}/{}/{}", self.base_url, kind.collection(), action),
            PathStyle::Versioned => {
                versioned_url(&self.base_url, kind, None, &kebab_to_pascal(action))
            }
        };
        tracing::debug!(%kind, %action, %url, "collection action");
        self.send_json(self.client.post(&url).json(&payload), &url)
            .await
    }
}

fn flat_url(base: &str, kind: EntityKind, id: Option<&str>, _action: &str) -> String {
    match id {
        Some(id) => format!("{}/{}/{}", base, kind.collection(), id),
        None => format!("{}/{}", base, kind.collection()),
    }
}

fn versioned_url(base: &str, kind: EntityKind, id: Option<&str>, action: &str) -> String {
    match id {
        Some(id) => format!("{}/v1/{}/{}?id={}", base, kind.controller(), action, id),
        None => format!("{}/v1/{}/{}", base, kind.controller(), action),
    }
}

/// `generate-otp` -> `GenerateOtp`
fn kebab_to_pascal(action: &str) -> String {
    action
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Client {
        message: format!("invalid identity header value: {}", e),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
