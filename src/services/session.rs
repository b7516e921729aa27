// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated session against the iGPSPORT API.
//!
//! The bearer token is obtained once at login and never refreshed; callers
//! needing a fresh token log in again.

use crate::config::Config;
use crate::error::AuthError;
use crate::models::null_default;
use crate::services::envelope::send_api_data;
use serde::{Deserialize, Serialize};
use std::fmt;

const LOGIN_PATH: &str = "auth/account/login";
const APP_ID: &str = "igpsport-web";

/// Logged-in session: shared HTTP client, API root and bearer token.
#[derive(Clone)]
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    app_id: &'a str,
    username: &'a str,
    password: &'a str,
}

/// Login result from iGPSPORT.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResult {
    #[serde(default, deserialize_with = "null_default")]
    pub token_type: String,
    #[serde(default, deserialize_with = "null_default")]
    pub access_token: String,
    #[serde(default, deserialize_with = "null_default")]
    pub refresh_token: String,
    #[serde(default, deserialize_with = "null_default")]
    pub expires_in: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub scope: String,
}

impl Session {
    /// Build the shared HTTP client and log in with the configured credentials.
    pub async fn login(config: &Config) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Self::login_with(http, &config.base_url, &config.username, &config.password).await
    }

    /// Log in using an existing HTTP client.
    pub async fn login_with(
        http: reqwest::Client,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let body = LoginRequest {
            app_id: APP_ID,
            username,
            password,
        };

        let request = http.post(format!("{}/{}", base_url, LOGIN_PATH)).json(&body);
        let result = send_api_data::<LoginResult, AuthError>(request).await?;

        if result.access_token.is_empty() {
            tracing::warn!("Login response carried no access token");
            return Err(AuthError::MissingToken);
        }

        tracing::info!(base_url = %base_url, "Logged in to iGPSPORT");

        Ok(Self {
            http,
            base_url,
            token: result.access_token,
        })
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authorized GET for an API path.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.get_url(&self.url(path))
    }

    /// Authorized GET for an absolute URL.
    pub fn get_url(&self, url: &str) -> reqwest::RequestBuilder {
        self.http.get(url).bearer_auth(&self.token)
    }
}
