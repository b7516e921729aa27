// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use igpsport_sync::models::{ControlSignal, DownloadResult, ResultHandler};
use igpsport_sync::services::IgpsportClient;
use igpsport_sync::Config;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test_access_token";
pub const BEARER: &str = "Bearer test_access_token";
pub const ACTIVITY_PATH: &str = "/web-gateway/web-analyze/activity";

/// Mount a successful login returning [`TEST_TOKEN`].
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/account/login"))
        .and(body_partial_json(json!({
            "appId": "igpsport-web",
            "username": "test_user",
            "password": "test_password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": {
                "token_type": "bearer",
                "access_token": TEST_TOKEN,
                "refresh_token": "test_refresh",
                "expires_in": 86400,
                "scope": "web"
            }
        })))
        .mount(server)
        .await;
}

/// Log in against the mock server.
#[allow(dead_code)]
pub async fn login_client(server: &MockServer) -> IgpsportClient {
    mount_login(server).await;
    IgpsportClient::login(&Config::with_base_url(server.uri()))
        .await
        .expect("Login against mock server failed")
}

/// JSON list row for an activity ID.
#[allow(dead_code)]
pub fn row(id: i64) -> serde_json::Value {
    json!({
        "rideId": id,
        "title": format!("Ride {}", id),
        "rideDistance": 1000.0 * id as f64,
        "startTime": format!("2025-05-{:02} 07:00:00", id)
    })
}

/// Mount one page of the activity list.
#[allow(dead_code)]
pub async fn mount_list_page(server: &MockServer, page_no: u32, total_pages: u32, ids: &[i64]) {
    let rows: Vec<serde_json::Value> = ids.iter().map(|id| row(*id)).collect();

    Mock::given(method("GET"))
        .and(path(format!("{}/queryMyActivity", ACTIVITY_PATH)))
        .and(query_param("pageNo", page_no.to_string()))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": {
                "rows": rows,
                "totalPage": total_pages,
                "pageNo": page_no,
                "pageSize": 20,
                "totalRows": ids.len()
            }
        })))
        .mount(server)
        .await;
}

/// Mount a working download URL and file for an activity.
#[allow(dead_code)]
pub async fn mount_download(server: &MockServer, id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("{}/getDownloadUrl/{}", ACTIVITY_PATH, id)))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": format!("{}/files/{}.fit", server.uri(), id)
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/files/{}.fit", id)))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(file_bytes(id)))
        .mount(server)
        .await;
}

/// Mount a download URL response with no usable URL.
#[allow(dead_code)]
pub async fn mount_missing_url(server: &MockServer, id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("{}/getDownloadUrl/{}", ACTIVITY_PATH, id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "success",
            "data": null
        })))
        .mount(server)
        .await;
}

/// Body served for an activity file.
#[allow(dead_code)]
pub fn file_bytes(id: i64) -> Vec<u8> {
    format!("FIT-{}", id).into_bytes()
}

/// Recorded handler call: activity ID and payload (if the download succeeded).
#[allow(dead_code)]
pub type Seen = Arc<Mutex<Vec<(i64, Option<Vec<u8>>)>>>;

/// Handler that records every result and always continues.
#[allow(dead_code)]
pub fn recorder() -> (Seen, impl ResultHandler + 'static) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = move |result: DownloadResult| {
        let payload = result.payload().map(|b| b.to_vec());
        sink.lock().unwrap().push((result.activity.id, payload));
        ControlSignal::Continue
    };
    (seen, handler)
}
