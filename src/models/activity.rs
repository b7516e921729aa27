// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! iGPSPORT activity models as returned by the list and detail endpoints.

use super::null_default;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Activity file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extension {
    #[default]
    Fit,
    Gpx,
    Tcx,
}

impl Extension {
    /// Value of the list endpoint's `reqType` parameter.
    pub fn req_type(self) -> &'static str {
        match self {
            Extension::Fit => "0",
            Extension::Gpx => "1",
            Extension::Tcx => "2",
        }
    }

    /// Conventional file suffix, without the dot.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Extension::Fit => "fit",
            Extension::Gpx => "gpx",
            Extension::Tcx => "tcx",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_suffix().to_uppercase())
    }
}

impl FromStr for Extension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" | "0" => Ok(Extension::Fit),
            "gpx" | "1" => Ok(Extension::Gpx),
            "tcx" | "2" => Ok(Extension::Tcx),
            other => Err(format!("unknown activity format: {other}")),
        }
    }
}

/// One row of the activity list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityRef {
    /// iGPSPORT ride ID
    #[serde(rename = "rideId")]
    pub id: i64,
    /// Activity name/title
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    /// Start time as formatted by the server
    #[serde(rename = "startTime", default, deserialize_with = "null_default")]
    pub start_time: String,
}

impl ActivityRef {
    /// Reference carrying only the ID, for failures before metadata is known.
    pub fn from_id(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            start_time: String::new(),
        }
    }
}

/// One page of the server-paginated activity list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, deserialize_with = "null_default")]
    pub rows: Vec<ActivityRef>,
    #[serde(rename = "pageNo", default, deserialize_with = "null_default")]
    pub page_number: u32,
    #[serde(rename = "totalPage", default, deserialize_with = "null_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub page_size: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub total_rows: u64,
}

impl Page {
    /// Whether another page follows this one.
    pub fn has_next(&self, page_no: u32) -> bool {
        page_no < self.total_pages
    }
}

/// Detailed activity record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    #[serde(default, deserialize_with = "null_default")]
    pub ride_id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub start_time: String,
    /// Distance in meters
    #[serde(default, deserialize_with = "null_default")]
    pub ride_distance: f64,
    /// Average speed in km/h
    #[serde(default, deserialize_with = "null_default")]
    pub avg_speed: f64,
    /// Max speed in km/h
    #[serde(default, deserialize_with = "null_default")]
    pub max_speed: f64,
    /// Direct URL of the FIT file
    #[serde(default, deserialize_with = "null_default")]
    pub fit_url: String,
    #[serde(default, deserialize_with = "null_default")]
    pub device_info: DeviceInfo,
}

impl ActivityDetail {
    /// List-row view of this detail.
    pub fn to_activity_ref(&self) -> ActivityRef {
        ActivityRef {
            id: self.ride_id,
            title: self.title.clone(),
            start_time: self.start_time.clone(),
        }
    }
}

/// Recording device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default, deserialize_with = "null_default")]
    pub device_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub software_version: String,
}
