use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use super::{actors, awards, next_update, now_micros, timestamp, today};
use crate::{
    entities::movie,
    error::AppResult,
    id,
    models::{ActorResponse, AwardResponse, MovieRequest, MovieResponse},
    store::Store,
    validate,
};

#[derive(Clone)]
pub struct MovieService {
    store: Store,
}

impl MovieService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: MovieRequest) -> AppResult<MovieResponse> {
        validate::movie(&req, today())?;

        let now = now_micros();
        let row = movie::Model {
            id: id::mint(),
            title: req.title,
            release_year: req.release_year,
            director: req.director,
            genre: req.genre,
            description: req.description,
            rating_tenths: req.rating.map(validate::rating_tenths),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.store.insert(movie::ActiveModel::from(row.clone()).reset_all()).await?;

        tracing::info!(id = %row.id, title = %row.title, "movie created");
        project(row)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<MovieResponse> {
        project(self.store.find_by_id::<movie::Entity>(id).await?)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<MovieResponse>> {
        let rows = self.store.list::<movie::Entity>(limit, super::offset(offset)).await?;
        rows.into_iter().map(project).collect()
    }

    pub async fn update(&self, id: Uuid, req: MovieRequest) -> AppResult<MovieResponse> {
        let mut row = self.store.find_by_id::<movie::Entity>(id).await?;
        validate::movie(&req, today())?;

        row.title = req.title;
        row.release_year = req.release_year;
        row.director = req.director;
        row.genre = req.genre;
        row.description = req.description;
        row.rating_tenths = req.rating.map(validate::rating_tenths);
        row.updated_at = next_update(row.updated_at);

        let changes = movie::ActiveModel {
            title: Set(row.title.clone()),
            release_year: Set(row.release_year),
            director: Set(row.director.clone()),
            genre: Set(row.genre.clone()),
            description: Set(row.description.clone()),
            rating_tenths: Set(row.rating_tenths),
            updated_at: Set(row.updated_at),
            ..Default::default()
        };
        self.store.update(id, changes).await?;

        tracing::info!(%id, "movie updated");
        project(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.soft_delete::<movie::Entity>(id, now_micros()).await?;
        tracing::info!(%id, "movie deleted");
        Ok(())
    }

    pub async fn actors(&self, id: Uuid) -> AppResult<Vec<ActorResponse>> {
        self.store.find_by_id::<movie::Entity>(id).await?;
        let rows = self.store.actors_for_movie(id).await?;
        rows.into_iter().map(actors::project).collect()
    }

    pub async fn awards(&self, id: Uuid) -> AppResult<Vec<AwardResponse>> {
        self.store.find_by_id::<movie::Entity>(id).await?;
        let rows = self.store.awards_for_movie(id).await?;
        rows.into_iter().map(awards::project).collect()
    }
}

pub(crate) fn project(row: movie::Model) -> AppResult<MovieResponse> {
    Ok(MovieResponse {
        id: row.id,
        title: row.title,
        release_year: row.release_year,
        director: row.director,
        genre: row.genre,
        description: row.description,
        rating: row.rating_tenths.map(|tenths| f64::from(tenths) / 10.0),
        created_at: timestamp(row.created_at)?,
        updated_at: timestamp(row.updated_at)?,
    })
}
