// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The `{code, message, data}` envelope wrapped around every JSON response.

use crate::error::{AuthError, DetailError, ListError, ResolveError, UserInfoError};
use crate::models::null_default;
use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;

/// Generic API response envelope. `code` 0 means success.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default, deserialize_with = "null_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub message: String,
    pub data: Option<T>,
}

/// Error types that can describe a failed envelope call.
pub(crate) trait ApiFailure: From<reqwest::Error> {
    fn decode(err: serde_json::Error) -> Self;
    fn remote(code: i64, message: String) -> Self;
}

/// Send a request and unwrap its envelope.
///
/// A non-zero `code` is a remote failure, even on an error status, so the
/// server's message is kept. Otherwise a non-success HTTP status is a
/// transport failure. The `data` field may legitimately be absent.
pub(crate) async fn send_api<T, E>(request: reqwest::RequestBuilder) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: ApiFailure,
{
    let response = request.send().await?;
    let status_error = response.error_for_status_ref().err();
    let body = response.bytes().await?;

    match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
        Ok(envelope) if envelope.code != 0 => Err(E::remote(envelope.code, envelope.message)),
        Ok(envelope) => match status_error {
            Some(e) => Err(E::from(e)),
            None => Ok(envelope.data),
        },
        Err(e) => Err(status_error.map_or_else(|| E::decode(e), E::from)),
    }
}

/// Like [`send_api`], but a missing `data` field is a decode failure.
pub(crate) async fn send_api_data<T, E>(request: reqwest::RequestBuilder) -> Result<T, E>
where
    T: DeserializeOwned,
    E: ApiFailure,
{
    send_api::<T, E>(request)
        .await?
        .ok_or_else(|| E::decode(serde_json::Error::custom("response has no data field")))
}

impl ApiFailure for AuthError {
    fn decode(err: serde_json::Error) -> Self {
        AuthError::Decode(err)
    }

    fn remote(code: i64, message: String) -> Self {
        AuthError::Rejected { code, message }
    }
}

impl ApiFailure for ListError {
    fn decode(err: serde_json::Error) -> Self {
        ListError::Decode(err)
    }

    fn remote(code: i64, message: String) -> Self {
        ListError::Remote(code, message)
    }
}

impl ApiFailure for ResolveError {
    fn decode(err: serde_json::Error) -> Self {
        ResolveError::Decode(err)
    }

    fn remote(code: i64, message: String) -> Self {
        ResolveError::Remote(code, message)
    }
}

impl ApiFailure for DetailError {
    fn decode(err: serde_json::Error) -> Self {
        DetailError::Decode(err)
    }

    fn remote(code: i64, message: String) -> Self {
        DetailError::Remote(code, message)
    }
}

impl ApiFailure for UserInfoError {
    fn decode(err: serde_json::Error) -> Self {
        UserInfoError::Decode(err)
    }

    fn remote(code: i64, message: String) -> Self {
        UserInfoError::Remote(code, message)
    }
}
