// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! iGPSPORT sync: download ride files from the iGPSPORT web API
//!
//! This crate logs in to iGPSPORT, pages through the rider's activity list
//! and fetches FIT/GPX/TCX files, either one at a time or through a bounded
//! pool of concurrent workers.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::Config;
pub use error::OrchestratorError;
pub use models::{ControlSignal, DownloadOptions, DownloadResult, Extension};
pub use services::{Downloader, IgpsportClient, Strategy};
