// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bulk download orchestration.
//!
//! A single page walker drives both strategies:
//! 1. Fetch list page N
//! 2. Hand each row to a sink (in-line processing, or the worker queue)
//! 3. Advance while `N < total_pages` and nobody asked to stop
//!
//! Every row goes through the same pipeline: resolve the download URL,
//! fetch the bytes, report a [`DownloadResult`] to the handler.

use crate::error::{DetailError, FetchError, ListError, OrchestratorError, ResolveError};
use crate::models::download::ValidatedOptions;
use crate::models::{
    ActivityDetail, ActivityRef, ControlSignal, DownloadOptions, DownloadResult, Page,
    ResultHandler, RunSummary,
};
use crate::services::igpsport::ListQuery;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Capacity of the driver → worker queue.
///
/// Bounds queued rows to this many on top of the ones workers hold.
const WORK_QUEUE_CAPACITY: usize = 1;

/// Remote operations the orchestrator needs.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn list_page(&self, query: &ListQuery) -> Result<Page, ListError>;

    async fn resolve_download_url(&self, activity_id: i64) -> Result<String, ResolveError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, FetchError>;

    async fn fetch_detail(&self, activity_id: i64) -> Result<ActivityDetail, DetailError>;
}

/// How rows are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// In the caller's task, strictly in list order.
    Sequential,
    /// On a pool of `max_concurrency` workers; order across workers is unspecified.
    Concurrent,
}

/// Downloads activity files from an [`ActivitySource`].
pub struct Downloader<S> {
    source: Arc<S>,
    page_size: u32,
}

impl<S> Clone for Downloader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            page_size: self.page_size,
        }
    }
}

impl<S: ActivitySource + 'static> Downloader<S> {
    pub fn new(source: Arc<S>, page_size: u32) -> Self {
        Self { source, page_size }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Download every listed activity, one at a time in list order.
    pub async fn download_all(
        &self,
        options: DownloadOptions,
    ) -> Result<RunSummary, OrchestratorError> {
        self.run(Strategy::Sequential, options).await
    }

    /// Download every listed activity on a bounded worker pool.
    pub async fn download_all_concurrent(
        &self,
        options: DownloadOptions,
    ) -> Result<RunSummary, OrchestratorError> {
        self.run(Strategy::Concurrent, options).await
    }

    /// Run a bulk download.
    ///
    /// Returns `Ok` when the list is exhausted or the handler returns
    /// [`ControlSignal::Stop`]. Only setup errors and page fetch failures are
    /// errors; item failures are reported to the handler.
    pub async fn run(
        &self,
        strategy: Strategy,
        options: DownloadOptions,
    ) -> Result<RunSummary, OrchestratorError> {
        let options = options.validate()?;

        tracing::info!(
            ?strategy,
            extension = %options.extension,
            workers = options.workers,
            page_size = self.page_size,
            "Starting bulk download"
        );

        let summary = match strategy {
            Strategy::Sequential => self.run_sequential(&options).await,
            Strategy::Concurrent => self.run_concurrent(&options).await,
        };

        match &summary {
            Ok(summary) => tracing::info!(
                delivered = summary.delivered,
                stopped_early = summary.stopped_early,
                "Bulk download finished"
            ),
            Err(e) => tracing::warn!(error = %e, "Bulk download aborted"),
        }

        summary
    }

    /// Download a single activity using the file URL from its detail record.
    ///
    /// Exactly one result is handed to `handler`.
    pub async fn download_one(&self, activity_id: i64, handler: &dyn ResultHandler) -> RunSummary {
        let result = self.fetch_one(activity_id).await;
        let signal = handler.on_result(result);

        RunSummary {
            delivered: 1,
            stopped_early: signal == ControlSignal::Stop,
        }
    }

    /// Fetch detail, then bytes from the detail's file URL.
    pub async fn fetch_one(&self, activity_id: i64) -> DownloadResult {
        let detail = match self.source.fetch_detail(activity_id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(activity_id, error = %e, "Activity detail lookup failed");
                return DownloadResult::failure(ActivityRef::from_id(activity_id), e);
            }
        };

        let mut activity = detail.to_activity_ref();
        activity.id = activity_id;

        if detail.fit_url.is_empty() {
            return DownloadResult::failure(activity, ResolveError::NotFound(activity_id));
        }

        match self.source.fetch_bytes(&detail.fit_url).await {
            Ok(payload) => DownloadResult::success(activity, payload),
            Err(e) => {
                tracing::warn!(activity_id, error = %e, "Activity file download failed");
                DownloadResult::failure(activity, e)
            }
        }
    }

    async fn run_sequential(
        &self,
        options: &ValidatedOptions,
    ) -> Result<RunSummary, OrchestratorError> {
        let mut summary = RunSummary::default();
        {
            let mut sink = RowSink::Inline {
                handler: options.handler.as_ref(),
                summary: &mut summary,
            };
            self.walk_pages(options, &mut sink).await?;
        }

        Ok(summary)
    }

    async fn run_concurrent(
        &self,
        options: &ValidatedOptions,
    ) -> Result<RunSummary, OrchestratorError> {
        let (tx, rx) = mpsc::channel(WORK_QUEUE_CAPACITY);
        let rx = Arc::new(Mutex::new(rx));
        let stop = CancellationToken::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let mut workers = JoinSet::new();
        for worker_id in 0..options.workers {
            workers.spawn(run_worker(
                worker_id,
                Arc::clone(&self.source),
                Arc::clone(&options.handler),
                Arc::clone(&rx),
                stop.clone(),
                Arc::clone(&delivered),
            ));
        }
        drop(rx);

        let mut sink = RowSink::Queue {
            tx,
            stop: stop.clone(),
        };
        let walked = self.walk_pages(options, &mut sink).await;

        // Closing the queue lets workers drain what is left and exit.
        drop(sink);

        let mut worker_failure = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Download worker failed");
                worker_failure.get_or_insert_with(|| e.to_string());
            }
        }

        walked?;
        if let Some(message) = worker_failure {
            return Err(OrchestratorError::WorkerFailed(message));
        }

        Ok(RunSummary {
            delivered: delivered.load(Ordering::SeqCst),
            stopped_early: stop.is_cancelled(),
        })
    }

    /// Fetch pages from 1 until the list ends or the sink stops.
    async fn walk_pages(
        &self,
        options: &ValidatedOptions,
        sink: &mut RowSink<'_>,
    ) -> Result<(), OrchestratorError> {
        let mut page_no = 1;

        loop {
            if sink.is_stopped() {
                return Ok(());
            }

            let query = ListQuery::new(page_no, self.page_size, options.extension)
                .with_date_range(options.begin_time.as_deref(), options.end_time.as_deref());

            let page = self
                .source
                .list_page(&query)
                .await
                .map_err(|source| OrchestratorError::ListFailed {
                    page: page_no,
                    source,
                })?;

            tracing::debug!(
                page_no,
                rows = page.rows.len(),
                total_pages = page.total_pages,
                "Fetched activity list page"
            );

            let has_next = page.has_next(page_no);
            for row in page.rows {
                if sink.accept(self.source.as_ref(), row).await == ControlSignal::Stop {
                    return Ok(());
                }
            }

            if !has_next {
                return Ok(());
            }
            page_no += 1;
        }
    }
}

/// Strategy-specific consumer of list rows.
enum RowSink<'a> {
    /// Process each row in the caller's task.
    Inline {
        handler: &'a dyn ResultHandler,
        summary: &'a mut RunSummary,
    },
    /// Hand each row to the worker pool.
    Queue {
        tx: mpsc::Sender<ActivityRef>,
        stop: CancellationToken,
    },
}

impl RowSink<'_> {
    fn is_stopped(&self) -> bool {
        match self {
            RowSink::Inline { summary, .. } => summary.stopped_early,
            RowSink::Queue { stop, .. } => stop.is_cancelled(),
        }
    }

    async fn accept<S: ActivitySource + ?Sized>(
        &mut self,
        source: &S,
        row: ActivityRef,
    ) -> ControlSignal {
        match self {
            RowSink::Inline { handler, summary } => {
                let result = process_item(source, row).await;
                summary.delivered += 1;

                let signal = handler.on_result(result);
                if signal == ControlSignal::Stop {
                    tracing::info!(delivered = summary.delivered, "Handler requested stop");
                    summary.stopped_early = true;
                }
                signal
            }
            RowSink::Queue { tx, stop } => {
                // Backpressure: waits while workers are busy, unless a stop arrives.
                tokio::select! {
                    biased;
                    _ = stop.cancelled() => ControlSignal::Stop,
                    sent = tx.send(row) => match sent {
                        Ok(()) => ControlSignal::Continue,
                        Err(_) => ControlSignal::Stop,
                    },
                }
            }
        }
    }
}

/// Worker loop: take rows until the queue closes or a stop is requested.
async fn run_worker<S: ActivitySource + ?Sized>(
    worker_id: usize,
    source: Arc<S>,
    handler: Arc<dyn ResultHandler>,
    rx: Arc<Mutex<mpsc::Receiver<ActivityRef>>>,
    stop: CancellationToken,
    delivered: Arc<AtomicUsize>,
) {
    loop {
        let next = {
            let mut rx = rx.lock().await;
            let next = tokio::select! {
                biased;
                _ = stop.cancelled() => None,
                row = rx.recv() => row,
            };
            // Re-check under the lock so no new item starts after a stop.
            next.filter(|_| !stop.is_cancelled())
        };

        let Some(row) = next else {
            break;
        };

        let result = process_item(source.as_ref(), row).await;
        let count = delivered.fetch_add(1, Ordering::SeqCst) + 1;

        if handler.on_result(result) == ControlSignal::Stop {
            if !stop.is_cancelled() {
                tracing::info!(worker_id, delivered = count, "Handler requested stop");
            }
            stop.cancel();
        }
    }

    tracing::debug!(worker_id, "Download worker exiting");
}

/// Resolve, fetch and wrap one activity. Failures become failed results.
async fn process_item<S: ActivitySource + ?Sized>(source: &S, activity: ActivityRef) -> DownloadResult {
    let url = match source.resolve_download_url(activity.id).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(activity_id = activity.id, error = %e, "Download URL lookup failed");
            return DownloadResult::failure(activity, e);
        }
    };

    match source.fetch_bytes(&url).await {
        Ok(payload) => {
            tracing::debug!(
                activity_id = activity.id,
                bytes = payload.len(),
                "Activity downloaded"
            );
            DownloadResult::success(activity, payload)
        }
        Err(e) => {
            tracing::warn!(activity_id = activity.id, error = %e, "Activity file download failed");
            DownloadResult::failure(activity, e)
        }
    }
}
