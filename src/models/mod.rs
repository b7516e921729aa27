// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the iGPSPORT API and download runs.

use serde::{Deserialize, Deserializer};

pub mod activity;
pub mod download;
pub mod user;

pub use activity::{ActivityDetail, ActivityRef, DeviceInfo, Extension, Page};
pub use download::{ControlSignal, DownloadOptions, DownloadResult, ResultHandler, RunSummary};
pub use user::UserInfo;

/// Deserialize an explicit JSON `null` as the type's default value.
///
/// Pair with `#[serde(default)]` so a missing key also yields the default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
