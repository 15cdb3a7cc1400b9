#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header::CONTENT_TYPE},
    response::Response,
};
use gmdb::{AppState, config::Config, db, routes};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Fresh in-memory store with the schema applied.
pub async fn test_state() -> Arc<AppState> {
    test_state_with(Config::default()).await
}

pub async fn test_state_with(config: Config) -> Arc<AppState> {
    let store = db::connect_in_memory().await.expect("in-memory store");
    store.migrate().await.expect("migrate");
    Arc::new(AppState::new(Arc::new(config), store))
}

/// Router over a fresh store, with the production middleware stack.
pub async fn test_app() -> (Router, Arc<AppState>) {
    let state = test_state().await;
    (routes::router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
