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
    models::{AwardRequest, AwardResponse},
    response::{Reply, created, done, ok},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    params: ListParams,
) -> AppResult<Reply<Vec<AwardResponse>>> {
    Ok(ok(state.services.awards.list(params.limit(), params.offset()).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<AwardResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.awards.get(id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<AwardRequest>, AppError>,
) -> AppResult<Reply<AwardResponse>> {
    Ok(created(state.services.awards.create(req).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<AwardRequest>, AppError>,
) -> AppResult<Reply<AwardResponse>> {
    let id = parse_id("id", &id)?;
    Ok(ok(state.services.awards.update(id, req).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Reply<()>> {
    let id = parse_id("id", &id)?;
    state.services.awards.delete(id).await?;
    Ok(done("award deleted"))
}
