// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! iGPSPORT sync command-line driver
//!
//! Logs in, walks the activity list and downloads every file with a worker
//! pool, logging one line per activity. Usage:
//!
//! ```text
//! igpsport-sync [fit|gpx|tcx] [BEGIN YYYY-MM-DD] [END YYYY-MM-DD]
//! ```

use anyhow::Context;
use igpsport_sync::models::{ControlSignal, DownloadOptions, DownloadResult, Extension};
use igpsport_sync::services::{Downloader, IgpsportClient};
use igpsport_sync::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let extension: Extension = args
        .next()
        .as_deref()
        .unwrap_or("fit")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let begin_time = args.next();
    let end_time = args.next();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.base_url, %extension, "Starting iGPSPORT sync");

    let client = IgpsportClient::login(&config)
        .await
        .context("Failed to log in to iGPSPORT")?;

    match client.user_info().await {
        Ok(user) => tracing::info!(
            member_id = user.member_id,
            nick_name = %user.nick_name,
            rides = user.ride_num,
            "Account loaded"
        ),
        Err(e) => tracing::warn!(error = %e, "Could not load account profile"),
    }

    let downloader = Downloader::new(Arc::new(client), config.page_size);
    let options = DownloadOptions::new(extension)
        .with_date_range(begin_time.as_deref(), end_time.as_deref())
        .with_max_concurrency(config.max_concurrency)
        .with_handler(log_result);

    let summary = downloader.download_all_concurrent(options).await?;
    tracing::info!(delivered = summary.delivered, "Sync complete");
    Ok(())
}

fn log_result(result: DownloadResult) -> ControlSignal {
    let activity = &result.activity;
    match &result.outcome {
        Ok(payload) => tracing::info!(
            activity_id = activity.id,
            title = %activity.title,
            start_time = %activity.start_time,
            bytes = payload.len(),
            "Downloaded activity"
        ),
        Err(e) => tracing::warn!(
            activity_id = activity.id,
            title = %activity.title,
            error = %e,
            "Failed to download activity"
        ),
    }
    ControlSignal::Continue
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("igpsport_sync=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
