// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Download requests, results and the handler that consumes them.

use crate::error::{DownloadError, OrchestratorError};
use crate::models::{ActivityRef, Extension};
use crate::time_utils::{non_empty, parse_filter_date};
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// Worker count used when `max_concurrency` is 0.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Outcome of downloading one activity.
#[derive(Debug)]
pub struct DownloadResult {
    /// Activity metadata; only the ID is set if lookup failed before metadata was known.
    pub activity: ActivityRef,
    pub outcome: Result<Bytes, DownloadError>,
}

impl DownloadResult {
    pub fn success(activity: ActivityRef, payload: Bytes) -> Self {
        Self {
            activity,
            outcome: Ok(payload),
        }
    }

    pub fn failure(activity: ActivityRef, error: impl Into<DownloadError>) -> Self {
        Self {
            activity,
            outcome: Err(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// File contents, present only on success.
    pub fn payload(&self) -> Option<&Bytes> {
        self.outcome.as_ref().ok()
    }

    /// Failure cause, present only on failure.
    pub fn failure_cause(&self) -> Option<&DownloadError> {
        self.outcome.as_ref().err()
    }
}

/// Handler verdict after each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Continue,
    Stop,
}

impl From<bool> for ControlSignal {
    /// `true` keeps going, `false` stops.
    fn from(keep_going: bool) -> Self {
        if keep_going {
            ControlSignal::Continue
        } else {
            ControlSignal::Stop
        }
    }
}

/// Receives every download result of a run.
///
/// In concurrent runs this is called from several workers at once.
pub trait ResultHandler: Send + Sync {
    fn on_result(&self, result: DownloadResult) -> ControlSignal;
}

impl<F> ResultHandler for F
where
    F: Fn(DownloadResult) -> ControlSignal + Send + Sync,
{
    fn on_result(&self, result: DownloadResult) -> ControlSignal {
        self(result)
    }
}

/// Options for a bulk-download run.
#[derive(Clone, Default)]
pub struct DownloadOptions {
    pub extension: Extension,
    /// Start date filter (`YYYY-MM-DD`); `None` or empty disables it
    pub begin_time: Option<String>,
    /// End date filter (`YYYY-MM-DD`); `None` or empty disables it
    pub end_time: Option<String>,
    /// Worker count for concurrent runs; 0 selects [`DEFAULT_CONCURRENCY`],
    /// negative values are rejected
    pub max_concurrency: i64,
    pub on_result: Option<Arc<dyn ResultHandler>>,
}

impl fmt::Debug for DownloadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadOptions")
            .field("extension", &self.extension)
            .field("begin_time", &self.begin_time)
            .field("end_time", &self.end_time)
            .field("max_concurrency", &self.max_concurrency)
            .field("on_result", &self.on_result.is_some())
            .finish()
    }
}

impl DownloadOptions {
    pub fn new(extension: Extension) -> Self {
        Self {
            extension,
            ..Self::default()
        }
    }

    pub fn with_date_range(mut self, begin: Option<&str>, end: Option<&str>) -> Self {
        self.begin_time = begin.map(str::to_string);
        self.end_time = end.map(str::to_string);
        self
    }

    pub fn with_max_concurrency(mut self, workers: i64) -> Self {
        self.max_concurrency = workers;
        self
    }

    pub fn with_handler(mut self, handler: impl ResultHandler + 'static) -> Self {
        self.on_result = Some(Arc::new(handler));
        self
    }

    /// Check the options once before a run starts.
    ///
    /// Returns the handler, the effective worker count and the normalized
    /// date filters.
    pub(crate) fn validate(&self) -> Result<ValidatedOptions, OrchestratorError> {
        let handler = self
            .on_result
            .clone()
            .ok_or(OrchestratorError::MissingCallback)?;

        let workers = match usize::try_from(self.max_concurrency) {
            Ok(0) => DEFAULT_CONCURRENCY,
            Ok(n) => n,
            Err(_) => {
                return Err(OrchestratorError::InvalidConcurrency {
                    requested: self.max_concurrency,
                })
            }
        };

        let begin_time = validate_filter("begin_time", self.begin_time.as_deref())?;
        let end_time = validate_filter("end_time", self.end_time.as_deref())?;

        Ok(ValidatedOptions {
            extension: self.extension,
            begin_time,
            end_time,
            workers,
            handler,
        })
    }
}

fn validate_filter(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, OrchestratorError> {
    match non_empty(value) {
        None => Ok(None),
        Some(date) if parse_filter_date(date).is_some() => Ok(Some(date.to_string())),
        Some(date) => Err(OrchestratorError::InvalidDateFilter {
            field,
            value: date.to_string(),
        }),
    }
}

/// Options after validation; immutable for the rest of the run.
#[derive(Clone)]
pub(crate) struct ValidatedOptions {
    pub extension: Extension,
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    pub workers: usize,
    pub handler: Arc<dyn ResultHandler>,
}

/// Totals reported when a run finishes without error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Results handed to the handler
    pub delivered: usize,
    /// Whether the handler asked to stop
    pub stopped_early: bool,
}
