// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API client and download orchestration.

pub mod downloader;
mod envelope;
pub mod igpsport;
pub mod session;

pub use downloader::{ActivitySource, Downloader, Strategy};
pub use igpsport::{IgpsportClient, ListQuery};
pub use session::Session;
