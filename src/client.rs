//! Shared HTTP client for the farm backend.
//!
//! Every request carries the stored bearer token when one exists. A 401 clears the
//! session before returning [`ClientError::Unauthorized`]; a 403 returns
//! [`ClientError::Forbidden`]. Other failures leave the session alone.
//!
//! Login and signup go through [`ApiClient::post_anonymous`] instead: no bearer token,
//! and a 401 there is a credentials problem, not an expired session.

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Which backend service a path is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Auth,
    Api,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    auth_base: Url,
    api_base: Url,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("auth_base", &self.auth_base.as_str())
            .field("api_base", &self.api_base.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            auth_base: Url::parse(&config.auth_base_url)?,
            api_base: Url::parse(&config.api_base_url)?,
            session,
        })
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Absolute URL for `segments` under the service root. Each segment is
    /// percent-encoded on its own, so a value like a phone number cannot add path levels.
    pub fn url(&self, service: Service, segments: &[&str]) -> ClientResult<Url> {
        let mut url = match service {
            Service::Auth => self.auth_base.clone(),
            Service::Api => self.api_base.clone(),
        };

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::Validation("base URL cannot hold a path".into()))?;
            path.pop_if_empty();
            path.extend(segments);
        }

        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> ClientResult<RequestBuilder> {
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token().await? {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Sends the request and maps failing statuses.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        self.dispatch(builder, true).await
    }

    async fn dispatch(&self, builder: RequestBuilder, session_bound: bool) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_status(status, &body);

        if session_bound && matches!(err, ClientError::Unauthorized) {
            warn!(%url, "request unauthorized; clearing session");
            if let Err(clear_err) = self.session.clear().await {
                warn!(error = %clear_err, "failed to clear session after 401");
            }
        } else {
            warn!(%url, status = status.as_u16(), "request failed");
        }

        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// GET a JSON array. A body that is not an array yields an empty list.
    #[instrument(skip(self, url), fields(url = %url))]
    pub async fn get_list<T: DeserializeOwned>(&self, url: Url) -> ClientResult<Vec<T>> {
        let response = self.send(self.request(Method::GET, url).await?).await?;
        let value: serde_json::Value = Self::decode(response).await?;

        match value {
            serde_json::Value::Array(items) => {
                let list = items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<T>, _>>()
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
                debug!(count = list.len(), "list fetched");
                Ok(list)
            }
            other => {
                debug!(kind = %json_kind(&other), "expected an array; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, url, body), fields(url = %url))]
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> ClientResult<Response> {
        self.send(self.request(Method::POST, url).await?.json(body))
            .await
    }

    /// POST without the stored token. A 401 leaves the session in place.
    #[instrument(skip(self, url, body), fields(url = %url))]
    pub async fn post_anonymous<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> ClientResult<Response> {
        self.dispatch(self.http.post(url).json(body), false).await
    }

    /// Anonymous POST that decodes the JSON reply.
    pub async fn post_anonymous_for<B, T>(&self, url: Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post_anonymous(url, body).await?;
        Self::decode(response).await
    }

    /// PUT with the payload in the query string and no body.
    #[instrument(skip(self, url, query), fields(url = %url))]
    pub async fn put_query<Q: Serialize + ?Sized>(&self, url: Url, query: &Q) -> ClientResult<Response> {
        self.send(self.request(Method::PUT, url).await?.query(query))
            .await
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
