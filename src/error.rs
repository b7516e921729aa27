// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the iGPSPORT client and the download orchestrator.
//!
//! Page-level and setup errors abort a run and reach the caller. Item-level
//! errors are wrapped in [`DownloadError`] and delivered through the result
//! handler instead.

/// Login failure.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Login request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Login response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Login rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("Login failed, please check your username and password")]
    MissingToken,
}

/// Failure fetching one page of the activity list.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Invalid page request: page {page_no}, size {page_size}")]
    InvalidPage { page_no: u32, page_size: u32 },

    #[error("Activity list request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Activity list response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Activity list API error: {1} (code: {0})")]
    Remote(i64, String),
}

/// Failure resolving the transient download URL of an activity.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No download URL for activity {0}")]
    NotFound(i64),

    #[error("Download URL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Download URL response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Download URL API error: {1} (code: {0})")]
    Remote(i64, String),
}

/// Failure fetching raw file bytes.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("File download failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure fetching activity detail.
#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    #[error("Activity detail request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Activity detail response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Activity detail API error: {1} (code: {0})")]
    Remote(i64, String),
}

/// Failure fetching the account profile.
#[derive(Debug, thiserror::Error)]
pub enum UserInfoError {
    #[error("User info request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("User info response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("User info API error: {1} (code: {0})")]
    Remote(i64, String),
}

/// Why a single activity could not be downloaded.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Error getting download URL: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Error downloading file: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error getting activity detail: {0}")]
    Detail(#[from] DetailError),
}

/// Failure of a whole bulk-download run.
///
/// A handler asking to stop is not an error; the run returns `Ok`.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("A result handler is required")]
    MissingCallback,

    #[error("max_concurrency must not be negative, got {requested}")]
    InvalidConcurrency { requested: i64 },

    #[error("Invalid {field} filter {value:?}, expected YYYY-MM-DD")]
    InvalidDateFilter { field: &'static str, value: String },

    #[error("Error getting activity list page {page}: {source}")]
    ListFailed {
        page: u32,
        #[source]
        source: ListError,
    },

    #[error("Download worker failed: {0}")]
    WorkerFailed(String),
}

impl ListError {
    /// True when the failure was reported by the API itself rather than the transport.
    pub fn is_remote(&self) -> bool {
        matches!(self, ListError::Remote(..))
    }
}
