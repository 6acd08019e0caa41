//! HTTP clients for the two remote services.
//!
//! Both services live at a single URL each and dispatch on an `action` query
//! parameter. Failures come back as non-2xx with `{"error": "..."}`.

pub mod auth;
pub mod subscriptions;

pub use auth::AuthClient;
pub use subscriptions::SubscriptionsClient;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use kommunalka_types::api::ErrorResponse;

use crate::error::{ClientError, Result};

/// One service base URL plus the shared connection pool.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    http: Client,
    base_url: String,
}

impl Endpoint {
    pub(crate) fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get<R>(&self, action: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("GET {} action={}", self.base_url, action);
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("action", action)])
            .query(query)
            .send()
            .await?;
        decode(action, resp).await
    }

    pub(crate) async fn post<B, R>(&self, action: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {} action={}", self.base_url, action);
        let resp = self
            .http
            .post(&self.base_url)
            .query(&[("action", action)])
            .json(body)
            .send()
            .await?;
        decode(action, resp).await
    }
}

async fn decode<R: DeserializeOwned>(action: &str, resp: Response) -> Result<R> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .map(|e| e.error);
        warn!(
            "{} failed ({}): {}",
            action,
            status,
            message.as_deref().unwrap_or("no error message")
        );
        return Err(ClientError::Application {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}
