#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use churchsite::{
    build_router,
    config::{RunMode, SessionConfig},
    db, test_utils::test_helpers, AppState, AssetDirs,
};
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_sessions_sqlx_store::SqliteStore;

pub const ADMIN_PASSWORD: &str = "admin123";

/// The real router over an in-memory database, plus the one cookie a
/// browser would be holding.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_mode(RunMode::Development).await
    }

    pub async fn with_mode(mode: RunMode) -> Self {
        let pool = test_helpers::create_test_db().await.unwrap();
        db::initialize(&pool, ADMIN_PASSWORD).await.unwrap();

        let store = SqliteStore::new(pool.clone())
            .with_table_name("sessions")
            .unwrap();
        store.migrate().await.unwrap();
        let session_layer = SessionConfig::for_mode(mode).create_layer(store);

        let router = build_router(
            AppState::new(pool.clone()),
            session_layer,
            mode,
            AssetDirs {
                static_dir: Path::new("static"),
                uploads_dir: Path::new("uploads"),
            },
        );

        TestApp {
            router,
            pool,
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, pairs: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(pairs).unwrap();
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a form page and pull the CSRF token out of it.
    pub async fn csrf_token(&mut self, uri: &str) -> String {
        let page = self.get(uri).await;
        assert_eq!(page.status, StatusCode::OK, "{} should render", uri);
        extract_csrf_token(&page.body).expect("form to carry a csrf token")
    }

    pub async fn login_as_admin(&mut self) {
        self.login("admin", ADMIN_PASSWORD).await;
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        let token = self.csrf_token("/login").await;
        self.post_form(
            "/login",
            &[
                ("username", username),
                ("password", password),
                ("csrf_token", &token),
            ],
        )
        .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        self.remember_cookie(&response);

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            location,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, response: &Response<Body>) {
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(pair) = set_cookie.split(';').next() {
                self.cookie = Some(pair.trim().to_string());
            }
        }
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn extract_csrf_token(html: &str) -> Option<String> {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')? + start;
    Some(html[start..end].to_string())
}
