//! HTTP adapter: path and query parsing, body decoding, envelope replies.
//! [`crate::error::AppError`] is the only place a failure becomes a status.

mod actors;
mod awards;
mod movies;

use std::{convert::Infallible, sync::Arc};

use axum::{
    Router,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, request::Parts},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, AppResult},
    id,
    models::AppInfo,
    response::{Reply, ok},
};

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_OFFSET: i64 = 0;

pub fn router(state: Arc<AppState>) -> Router {
    let timeout = state.config.server.request_timeout();

    Router::new()
        .route("/ping", get(ping))
        .route("/version", get(version))
        .route("/actors", get(actors::list).post(actors::create))
        .route("/actors/", get(actors::list).post(actors::create))
        .route("/actors/{id}", get(actors::get).put(actors::update).delete(actors::delete))
        .route("/actors/{id}/movies", get(actors::movies))
        .route("/actors/{id}/movies/{movie_id}", post(actors::add_movie))
        .route("/actors/{id}/awards", get(actors::awards))
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route("/movies/{id}", get(movies::get).put(movies::update).delete(movies::delete))
        .route("/movies/{id}/actors", get(movies::actors))
        .route("/movies/{id}/awards", get(movies::awards))
        .route("/awards", get(awards::list).post(awards::create))
        .route("/awards/", get(awards::list).post(awards::create))
        .route("/awards/{id}", get(awards::get).put(awards::update).delete(awards::delete))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

async fn ping() -> Reply<&'static str> {
    ok("pong")
}

async fn version(State(state): State<Arc<AppState>>) -> Reply<AppInfo> {
    let app = &state.config.app;
    ok(AppInfo {
        name: app.name.clone(),
        version: app.version.clone(),
        environment: app.environment.clone(),
    })
}

/// `?limit=&offset=`. Unparseable or repeated values fall back to the
/// defaults; the first occurrence of a key wins.
#[derive(Debug, Default)]
pub struct ListParams {
    limit: Option<String>,
    offset: Option<String>,
}

impl ListParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    pub fn limit(&self) -> i64 {
        self.limit.as_deref().and_then(|s| s.trim().parse().ok()).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.as_deref().and_then(|s| s.trim().parse().ok()).unwrap_or(DEFAULT_OFFSET)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ListParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

pub(crate) fn parse_id(param: &'static str, raw: &str) -> AppResult<Uuid> {
    id::parse(raw).ok_or_else(|| AppError::BadIdentifier { param, value: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<&str>, offset: Option<&str>) -> ListParams {
        ListParams { limit: limit.map(String::from), offset: offset.map(String::from) }
    }

    #[test]
    fn list_params_fall_back_to_defaults() {
        let p = params(Some("abc"), Some("-x"));
        assert_eq!((p.limit(), p.offset()), (10, 0));

        let p = params(None, None);
        assert_eq!((p.limit(), p.offset()), (10, 0));

        let p = params(Some("25"), Some("5"));
        assert_eq!((p.limit(), p.offset()), (25, 5));

        let p = params(Some("-1"), Some("-3"));
        assert_eq!((p.limit(), p.offset()), (-1, -3));
    }

    #[test]
    fn list_params_keep_the_first_occurrence() {
        let pairs = |raw: &[(&str, &str)]| {
            raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<Vec<_>>()
        };

        let p = ListParams::from_pairs(pairs(&[("limit", "1"), ("limit", "2"), ("sort", "x")]));
        assert_eq!((p.limit(), p.offset()), (1, 0));

        let p = ListParams::from_pairs(pairs(&[("offset", "oops"), ("offset", "4")]));
        assert_eq!((p.limit(), p.offset()), (10, 0));
    }

    #[test]
    fn parse_id_names_the_parameter() {
        let err = parse_id("movie_id", "nope").unwrap_err();
        assert_eq!(err.to_string(), r#"invalid movie_id parameter: "nope" is not a valid identifier"#);
    }
}
