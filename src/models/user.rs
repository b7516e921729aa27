// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! iGPSPORT account profile.

use super::null_default;
use serde::Deserialize;

/// Profile of the logged-in rider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, deserialize_with = "null_default")]
    pub member_id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub nick_name: String,
    /// Total number of recorded rides
    #[serde(default, deserialize_with = "null_default")]
    pub ride_num: u64,
}
