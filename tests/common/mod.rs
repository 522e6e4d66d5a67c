use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::Key;
use movieshelf::{
    AppState, config::Config, db, repository::MovieRepository, router, tmdb::TmdbClient,
};
use sea_orm::ConnectOptions;
use serde_json::json;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

async fn search(headers: HeaderMap) -> Response {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "status_code": 7 }))).into_response();
    }

    Json(json!({
        "page": 1,
        "results": [
            {
                "id": 278,
                "original_title": "The Shawshank Redemption",
                "title": "The Shawshank Redemption",
                "release_date": "1994-09-23",
                "overview": "Imprisoned in the 1940s for the double murder of his wife and her lover...",
                "poster_path": "/9cqNxx0GxF0bflZmeSMuL5tnGzr.jpg",
                "vote_average": 8.7
            },
            {
                "id": 27205,
                "original_title": "Inception",
                "title": "Inception",
                "release_date": "2010-07-15",
                "overview": "Cobb, a skilled thief who commits corporate espionage...",
                "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
                "vote_average": 8.4
            },
            {
                "id": 999001,
                "original_title": "Untitled Heist Project",
                "release_date": "",
                "overview": "",
                "poster_path": null,
                "vote_average": 0.0
            }
        ]
    }))
    .into_response()
}

async fn fake_tmdb() -> String {
    let app = Router::new().route("/search/movie", get(search));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_token(TOKEN).await
    }

    pub async fn with_token(token: &str) -> Self {
        let base_url = fake_tmdb().await;

        let config = Config::from_lookup(|name| match name {
            "TMDB_ACCESS_TOKEN" => Some(token.to_string()),
            "TMDB_BASE_URL" => Some(base_url.clone()),
            "TMDB_IMAGE_BASE_URL" => Some(IMAGE_BASE.to_string()),
            "TMDB_RPS" => Some("100".to_string()),
            _ => None,
        })
        .unwrap();

        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = db::connect_and_migrate(options).await.unwrap();

        let http = wreq::Client::builder().build().unwrap();
        let tmdb = TmdbClient::new(
            http,
            config.tmdb_access_token.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_rps,
        );

        let state = AppState {
            config: Arc::new(config),
            movies: MovieRepository::new(db),
            tmdb: Arc::new(tmdb),
            key: Key::generate(),
        };
        let router = router(state.clone());
        Self { state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers().get("location").and_then(|v| v.to_str().ok()).unwrap_or_default()
}

/// The `name=value` part of the response's Set-Cookie header.
pub fn cookie_pair(response: &Response) -> Option<String> {
    let header = response.headers().get("set-cookie")?.to_str().ok()?;
    header.split(';').next().map(str::to_string)
}
