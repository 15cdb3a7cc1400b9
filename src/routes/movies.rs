use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use super::{ListParams, parse_id};
use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{ActorResponse, AwardResponse, MovieRequest, MovieResponse},
    response::{Reply, created, done, ok},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> AppResult<Reply<Vec<MovieResponse>>> {
    Ok(ok(state.services.movies.list(params.limit(), params.offset()).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<MovieResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.movies.get(id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<MovieRequest>, AppError>,
) -> AppResult<Reply<MovieResponse>> {
    Ok(created(state.services.movies.create(req).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<MovieRequest>, AppError>,
) -> AppResult<Reply<MovieResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.movies.update(id, req).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<()>> {
    let id = parse_id("id", &id)?;
    state.services.movies.delete(id).await?;
    Ok(done("movie deleted"))
}

pub async fn actors(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<Vec<ActorResponse>>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.movies.actors(id).await?))
}

pub async fn awards(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<Vec<AwardResponse>>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.movies.awards(id).await?))
}
