// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP client for the Uptime Kuma REST API.
//!
//! Requests are sent once: there is no retry and no client-side timeout, a
//! failed call is reported to the caller which logs and abandons it.

use super::types::{CreateMonitorResponse, MonitorListResponse, MonitorPayload, TokenResponse};
use super::MonitorBackend;
use crate::errors::BackendError;
use crate::monitor::MonitorRecord;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Build the API base URL from a configured server address.
///
/// Adds `http://` when no scheme is given and strips trailing slashes.
pub(crate) fn build_api_url(server: &str) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        server.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", server.trim_end_matches('/'))
    }
}

/// Authenticated client for one Uptime Kuma instance.
#[derive(Debug, Clone)]
pub struct KumaClient {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl KumaClient {
    /// Log in with a user name and password and return an authenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidBaseUrl`] for an unusable URL,
    /// [`BackendError::Login`] if the credentials are rejected and
    /// [`BackendError::Request`] if the backend cannot be reached.
    pub async fn login(server: &str, username: &str, password: &str) -> Result<Self, BackendError> {
        let base_url = validated_base_url(server)?;
        let http = HttpClient::new();
        let url = format!("{base_url}/login/access-token");

        debug!(url = %url, user = %username, "Logging in to Uptime Kuma");

        let response = http
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;
        if !status.is_success() {
            return Err(BackendError::Login(format!("HTTP {status}: {body}")));
        }

        let token: TokenResponse = decode(&url, &body)?;
        info!(url = %base_url, "Connected to Uptime Kuma");

        Ok(Self {
            http,
            base_url,
            token: token.access_token,
        })
    }

    /// Create a client from an already issued access token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidBaseUrl`] for an unusable URL.
    pub fn with_token(server: &str, token: impl Into<String>) -> Result<Self, BackendError> {
        Ok(Self {
            http: HttpClient::new(),
            base_url: validated_base_url(server)?,
            token: token.into(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send an authenticated request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder, method: &str, url: &str) -> Result<String, BackendError> {
        debug!(method = %method, url = %url, "HTTP API request to Uptime Kuma");

        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Request {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = body.len(),
            "HTTP API request successful"
        );
        Ok(body)
    }
}

#[async_trait]
impl MonitorBackend for KumaClient {
    async fn list_monitors(&self) -> Result<Vec<MonitorRecord>, BackendError> {
        let url = self.endpoint("monitors");
        let body = self.send(self.http.get(&url), "GET", &url).await?;
        let list: MonitorListResponse = decode(&url, &body)?;
        Ok(list.monitors)
    }

    async fn create_monitor(&self, monitor: &MonitorPayload) -> Result<u64, BackendError> {
        let url = self.endpoint("monitors");
        let body = self
            .send(self.http.post(&url).json(monitor), "POST", &url)
            .await?;
        let created: CreateMonitorResponse = decode(&url, &body)?;
        Ok(created.monitor_id)
    }

    async fn update_monitor(&self, id: u64, monitor: &MonitorPayload) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("monitors/{id}"));
        self.send(self.http.patch(&url).json(monitor), "PATCH", &url)
            .await?;
        Ok(())
    }

    async fn delete_monitor(&self, id: u64) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("monitors/{id}"));
        self.send(self.http.delete(&url), "DELETE", &url).await?;
        Ok(())
    }
}

fn validated_base_url(server: &str) -> Result<String, BackendError> {
    let base_url = build_api_url(server);
    Url::parse(&base_url).map_err(|e| BackendError::InvalidBaseUrl {
        url: server.to_string(),
        reason: e.to_string(),
    })?;
    Ok(base_url)
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
