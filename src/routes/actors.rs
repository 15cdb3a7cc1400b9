use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use super::{ListParams, parse_id};
use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{ActorRequest, ActorResponse, AwardResponse, MovieResponse},
    response::{Envelope, Reply, created, done, ok},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> AppResult<Reply<Vec<ActorResponse>>> {
    Ok(ok(state.services.actors.list(params.limit(), params.offset()).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<ActorResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.actors.get(id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<ActorRequest>, AppError>,
) -> AppResult<Reply<ActorResponse>> {
    Ok(created(state.services.actors.create(req).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<ActorRequest>, AppError>,
) -> AppResult<Reply<ActorResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.actors.update(id, req).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<()>> {
    let id = parse_id("id", &id)?;
    state.services.actors.delete(id).await?;
    Ok(done("actor deleted"))
}

pub async fn movies(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<Vec<MovieResponse>>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.actors.movies(id).await?))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Path((id, movie_id)), _): WithRejection<Path<(String, String)>, AppError>,
) -> AppResult<Reply<Vec<MovieResponse>>> {
    let id = parse_id("id", &id)?;
    let movie_id = parse_id("movie_id", &movie_id)?;
    let movies = state.services.actors.add_movie(id, movie_id).await?;
    Ok((StatusCode::OK, Json(Envelope::success(movies).with_message("association added"))))
}

pub async fn awards(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<Vec<AwardResponse>>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.actors.awards(id).await?))
}
