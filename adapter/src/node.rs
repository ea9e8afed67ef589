//! HTTP client for the node API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use vapor_types::ConfigError;

use crate::error::AdapterError;
use crate::rpc::{NodeResponse, STATUS_SUCCESS};

/// Basic-auth credentials parsed from `user:password`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    user: String,
    password: String,
}

impl AccessToken {
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse an optional token. The empty string means no authentication.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ConfigError> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl FromStr for AccessToken {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(password), None) => Ok(Self {
                user: user.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ConfigError::InvalidAccessToken),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client for a node's JSON API.
///
/// Every call is a POST of a JSON body to `{node_url}/{endpoint}`; the reply
/// is a [`NodeResponse`] envelope whose `data` is decoded into the caller's
/// response type.
#[derive(Clone, Debug)]
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
    auth: Option<AccessToken>,
}

impl NodeClient {
    /// Create a client with 30s request and 10s connect timeouts.
    pub fn new(node_url: impl Into<String>, auth: Option<AccessToken>) -> Result<Self, AdapterError> {
        Self::with_timeouts(node_url, auth, Duration::from_secs(30), Duration::from_secs(10))
    }

    pub fn with_timeouts(
        node_url: impl Into<String>,
        auth: Option<AccessToken>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, AdapterError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| AdapterError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// POST `req` to `endpoint` and decode the envelope's `data`.
    pub async fn request<Req, Resp>(&self, endpoint: &str, req: &Req) -> Result<Resp, AdapterError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let result = self.send(endpoint, req).await;
        if let Err(e) = &result {
            warn!(endpoint, error = %e, "node request failed");
        }
        result
    }

    async fn send<Req, Resp>(&self, endpoint: &str, req: &Req) -> Result<Resp, AdapterError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.node_url, endpoint);
        debug!(%url, "node request");

        let mut builder = self.http.post(&url).json(req);
        if let Some(auth) = &self.auth {
            builder = builder.basic_auth(&auth.user, Some(&auth.password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AdapterError::Http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let envelope: NodeResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        if envelope.status != STATUS_SUCCESS {
            return Err(AdapterError::Node(envelope.error_detail));
        }

        serde_json::from_value(envelope.data)
            .map_err(|e| AdapterError::InvalidResponse(format!("{endpoint}: {e}")))
    }
}
