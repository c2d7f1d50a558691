//! HttpWorkflowyApi - REST implementation of the Workflowy service calls.
//!
//! Talks to the undocumented endpoints used by the web client:
//! - `POST /accounts/login/` to obtain a `sessionid` cookie
//! - `GET /get_initialization_data` for the tree and session metadata
//! - `POST /push_and_poll` to apply a batch of operations
//!
//! Redirects are never followed: a successful login is recognised by its
//! 302 response, and an expired session shows up as a redirect on fetch.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use reqwest::{Client, ClientBuilder, StatusCode, redirect};
use std::time::Duration;
use tracing::{debug, warn};
use workflowy_core::tree::InitializationData;
use workflowy_core::{PushPollRequest, Result, WorkflowyApi, WorkflowyError};

use crate::config::WorkflowyConfig;

const SESSION_COOKIE: &str = "sessionid";

/// Service API implementation backed by reqwest.
#[derive(Clone)]
pub struct HttpWorkflowyApi {
    client: Client,
    base_url: String,
    client_version: String,
}

impl HttpWorkflowyApi {
    /// Creates an API client from configuration.
    pub fn new(config: &WorkflowyConfig) -> Result<Self> {
        let client = Self::client_builder(config)
            .build()
            .map_err(|e| WorkflowyError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::from_client(client, config))
    }

    /// Returns a reqwest builder preset for this service (no redirects, timeout).
    pub fn client_builder(config: &WorkflowyConfig) -> ClientBuilder {
        Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Wraps an existing reqwest client.
    ///
    /// The client must not follow redirects, otherwise login cannot succeed.
    pub fn from_client(client: Client, config: &WorkflowyConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_version: config.client_version.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn cookie(session: &str) -> String {
        format!("{}={}", SESSION_COOKIE, session)
    }
}

/// Extracts the `sessionid` value from the `Set-Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

fn transport(context: &str, err: reqwest::Error) -> WorkflowyError {
    WorkflowyError::transport(format!("{}: {}", context, err))
}

#[async_trait]
impl WorkflowyApi for HttpWorkflowyApi {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        debug!(username, "Logging in");

        let response = self
            .client
            .post(self.url("/accounts/login/"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| transport("Login request failed", e))?;

        let status = response.status();
        if status != StatusCode::FOUND {
            warn!(%status, "Login did not redirect");
            return Err(WorkflowyError::authentication(format!(
                "expected redirect after login, got {}",
                status
            )));
        }

        session_cookie(response.headers())
            .ok_or_else(|| WorkflowyError::authentication("no sessionid cookie in login response"))
    }

    async fn fetch_initialization_data(&self, session: &str) -> Result<InitializationData> {
        debug!("Fetching initialization data");

        let response = self
            .client
            .get(self.url("/get_initialization_data"))
            .query(&[("client_version", self.client_version.as_str())])
            .header(COOKIE, Self::cookie(session))
            .send()
            .await
            .map_err(|e| transport("Failed to fetch initialization data", e))?;

        let status = response.status();
        if status.is_redirection()
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Err(WorkflowyError::authentication(format!(
                "session rejected ({})",
                status
            )));
        }
        if !status.is_success() {
            return Err(WorkflowyError::malformed_response(format!(
                "initialization data request returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport("Failed to read initialization data", e))?;
        InitializationData::from_json(&body)
    }

    async fn push_and_poll(&self, session: &str, request: &PushPollRequest) -> Result<()> {
        debug!(push_poll_id = %request.push_poll_id, "Sending push_and_poll");

        let response = self
            .client
            .post(self.url("/push_and_poll"))
            .header(COOKIE, Self::cookie(session))
            .form(&request.form_fields(&self.client_version))
            .send()
            .await
            .map_err(|e| transport("push_and_poll request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WorkflowyError::submission_failed(
                Some(status.as_u16()),
                error_text,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_session_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("csrftoken=abc; Path=/"));
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("sessionid=tok123; expires=Thu, 01 Jan 2099 00:00:00 GMT; HttpOnly; Path=/"),
        );

        assert_eq!(session_cookie(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_session_cookie_missing() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("csrftoken=abc; Path=/"));
        assert!(session_cookie(&headers).is_none());

        headers.append(SET_COOKIE, HeaderValue::from_static("sessionid=; Path=/"));
        assert!(session_cookie(&headers).is_none());
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let config = WorkflowyConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let api = HttpWorkflowyApi::new(&config).unwrap();
        assert_eq!(api.url("/push_and_poll"), "http://localhost:9000/push_and_poll");
    }
}
