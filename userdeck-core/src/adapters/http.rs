//! HTTP client for the user-management backend
//!
//! Implements both ports over JSON/HTTP:
//! - `GET/POST /users`, `GET/PUT/DELETE /users/{id}` for [`RemoteUserService`]
//! - `GET /cluster/nodes` for [`ClusterTopologyService`]
//!
//! Requests are single attempts with no timeout; a 2xx status is success,
//! anything else is a transport error.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{ClusterTopologySnapshot, User, UserDraft, UserPatch};
use crate::ports::{ClusterTopologyService, RemoteUserService};

/// Shared request plumbing for both services
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_address: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_address: config.base_address.clone(),
        })
    }

    /// Join path segments onto the base address, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_address.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Cannot join paths onto {}", self.base_address)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<(RequestBuilder, String)> {
        let url = self.endpoint(segments)?;
        let label = format!("{} {}", method, url.path());
        debug!(request = %label, "sending request");
        Ok((self.client.request(method, url), label))
    }

    /// Send and require a 2xx status
    async fn send(&self, builder: RequestBuilder, label: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_request_error(e, label))?;

        check_response_status(&response, label)?;
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, label: &str) -> Result<T> {
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("{}: failed to read body: {}", label, e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::decode(format!("{}: unexpected response body: {}", label, e)))
    }

    /// Map request errors to readable messages
    fn map_request_error(&self, error: reqwest::Error, label: &str) -> Error {
        if error.is_connect() {
            Error::transport(format!(
                "{}: unable to connect to {}",
                label, self.base_address
            ))
        } else {
            Error::transport(format!("{}: request failed: {}", label, error))
        }
    }
}

fn check_response_status(response: &Response, label: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::status(
            status.as_u16(),
            format!("{} returned HTTP {}", label, status.as_u16()),
        ))
    }
}

/// [`RemoteUserService`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpUserService {
    api: ApiClient,
}

impl HttpUserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RemoteUserService for HttpUserService {
    async fn list(&self) -> Result<Vec<User>> {
        let (builder, label) = self.api.request(Method::GET, &["users"])?;
        let response = self.api.send(builder, &label).await?;
        ApiClient::decode(response, &label).await
    }

    async fn get(&self, id: &str) -> Result<User> {
        let (builder, label) = self.api.request(Method::GET, &["users", id])?;
        let response = match self.api.send(builder, &label).await {
            Ok(response) => response,
            Err(e) if e.http_status() == Some(404) => {
                return Err(Error::not_found(format!("User {}", id)));
            }
            Err(e) => return Err(e),
        };
        ApiClient::decode(response, &label).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<User> {
        let (builder, label) = self.api.request(Method::POST, &["users"])?;
        let response = self.api.send(builder.json(draft), &label).await?;
        ApiClient::decode(response, &label).await
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<()> {
        let (builder, label) = self.api.request(Method::PUT, &["users", id])?;
        // Body is the server's echo of the record; the caller keeps its own copy
        self.api.send(builder.json(patch), &label).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let (builder, label) = self.api.request(Method::DELETE, &["users", id])?;
        self.api.send(builder, &label).await?;
        Ok(())
    }
}

/// [`ClusterTopologyService`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpTopologyService {
    api: ApiClient,
}

impl HttpTopologyService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ClusterTopologyService for HttpTopologyService {
    async fn fetch_topology(&self) -> Result<ClusterTopologySnapshot> {
        let (builder, label) = self.api.request(Method::GET, &["cluster", "nodes"])?;
        let response = self.api.send(builder, &label).await?;
        ApiClient::decode(response, &label).await
    }
}
