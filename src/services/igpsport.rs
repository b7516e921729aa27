// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! iGPSPORT API client.
//!
//! Handles:
//! - Activity list paging with optional date filters
//! - Download URL resolution and raw file fetches
//! - Activity detail and account profile lookups

use crate::config::Config;
use crate::error::{AuthError, DetailError, FetchError, ListError, ResolveError, UserInfoError};
use crate::models::{ActivityDetail, Extension, Page, UserInfo};
use crate::services::downloader::ActivitySource;
use crate::services::envelope::{send_api, send_api_data};
use crate::services::session::Session;
use crate::time_utils::non_empty;
use async_trait::async_trait;
use bytes::Bytes;

const ACTIVITY_PATH: &str = "web-gateway/web-analyze/activity";
const USER_INFO_PATH: &str = "mobile/api/User/UserInfo";

/// Parameters for one activity list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page_no: u32,
    pub page_size: u32,
    pub extension: Extension,
    /// `YYYY-MM-DD`; omitted from the request when `None` or empty
    pub begin_time: Option<String>,
    /// `YYYY-MM-DD`; omitted from the request when `None` or empty
    pub end_time: Option<String>,
}

impl ListQuery {
    pub fn new(page_no: u32, page_size: u32, extension: Extension) -> Self {
        Self {
            page_no,
            page_size,
            extension,
            begin_time: None,
            end_time: None,
        }
    }

    pub fn with_date_range(mut self, begin: Option<&str>, end: Option<&str>) -> Self {
        self.begin_time = begin.map(str::to_string);
        self.end_time = end.map(str::to_string);
        self
    }

    /// Query parameters, leaving out empty date filters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageNo", self.page_no.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sort", "1".to_string()),
            ("reqType", self.extension.req_type().to_string()),
        ];
        if let Some(begin) = non_empty(self.begin_time.as_deref()) {
            params.push(("beginTime", begin.to_string()));
        }
        if let Some(end) = non_empty(self.end_time.as_deref()) {
            params.push(("endTime", end.to_string()));
        }
        params
    }
}

/// iGPSPORT API client bound to a logged-in session.
#[derive(Debug, Clone)]
pub struct IgpsportClient {
    session: Session,
}

impl IgpsportClient {
    /// Log in with the configured credentials.
    pub async fn login(config: &Config) -> Result<Self, AuthError> {
        Ok(Self::from_session(Session::login(config).await?))
    }

    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch one page of the activity list.
    pub async fn list_activities(&self, query: &ListQuery) -> Result<Page, ListError> {
        if query.page_no < 1 || query.page_size == 0 {
            return Err(ListError::InvalidPage {
                page_no: query.page_no,
                page_size: query.page_size,
            });
        }

        tracing::debug!(
            page_no = query.page_no,
            page_size = query.page_size,
            extension = %query.extension,
            "Fetching activity list page"
        );

        let request = self
            .session
            .get(&format!("{}/queryMyActivity", ACTIVITY_PATH))
            .query(&query.params());

        let page = send_api::<Page, ListError>(request).await?;
        Ok(page.unwrap_or_default())
    }

    /// Resolve the short-lived download URL of an activity file.
    pub async fn resolve_download_url(&self, activity_id: i64) -> Result<String, ResolveError> {
        let request = self
            .session
            .get(&format!("{}/getDownloadUrl/{}", ACTIVITY_PATH, activity_id));

        match send_api::<serde_json::Value, ResolveError>(request).await? {
            Some(serde_json::Value::String(url)) if !url.is_empty() => Ok(url),
            _ => Err(ResolveError::NotFound(activity_id)),
        }
    }

    /// Download a file with the session's credentials, buffering the whole body.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.session.get_url(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?)
    }

    /// Fetch the detailed record of one activity.
    pub async fn fetch_detail(&self, activity_id: i64) -> Result<ActivityDetail, DetailError> {
        let request = self
            .session
            .get(&format!("{}/queryActivityDetail/{}", ACTIVITY_PATH, activity_id));
        send_api_data(request).await
    }

    /// Get the logged-in rider's profile.
    pub async fn user_info(&self) -> Result<UserInfo, UserInfoError> {
        send_api_data(self.session.get(USER_INFO_PATH)).await
    }
}

#[async_trait]
impl ActivitySource for IgpsportClient {
    async fn list_page(&self, query: &ListQuery) -> Result<Page, ListError> {
        self.list_activities(query).await
    }

    async fn resolve_download_url(&self, activity_id: i64) -> Result<String, ResolveError> {
        IgpsportClient::resolve_download_url(self, activity_id).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, FetchError> {
        IgpsportClient::fetch_bytes(self, url).await
    }

    async fn fetch_detail(&self, activity_id: i64) -> Result<ActivityDetail, DetailError> {
        IgpsportClient::fetch_detail(self, activity_id).await
    }
}
