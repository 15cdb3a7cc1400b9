use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use super::{awards, movies, next_update, now_micros, timestamp, today};
use crate::{
    entities::actor,
    error::AppResult,
    id,
    models::{ActorRequest, ActorResponse, AwardResponse, MovieResponse},
    store::Store,
    validate,
};

#[derive(Clone)]
pub struct ActorService {
    store: Store,
}

impl ActorService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: ActorRequest) -> AppResult<ActorResponse> {
        validate::actor(&req, today())?;

        let now = now_micros();
        let row = actor::Model {
            id: id::mint(),
            name: req.name,
            birth_date: req.birth_date.map(|d| d.to_string()),
            biography: req.biography,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.store.insert(actor::ActiveModel::from(row.clone()).reset_all()).await?;

        tracing::info!(id = %row.id, name = %row.name, "actor created");
        project(row)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ActorResponse> {
        project(self.store.find_by_id::<actor::Entity>(id).await?)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<ActorResponse>> {
        let rows = self.store.list::<actor::Entity>(limit, super::offset(offset)).await?;
        rows.into_iter().map(project).collect()
    }

    pub async fn update(&self, id: Uuid, req: ActorRequest) -> AppResult<ActorResponse> {
        let mut row = self.store.find_by_id::<actor::Entity>(id).await?;
        validate::actor(&req, today())?;

        row.name = req.name;
        row.birth_date = req.birth_date.map(|d| d.to_string());
        row.biography = req.biography;
        row.updated_at = next_update(row.updated_at);

        let changes = actor::ActiveModel {
            name: Set(row.name.clone()),
            birth_date: Set(row.birth_date.clone()),
            biography: Set(row.biography.clone()),
            updated_at: Set(row.updated_at),
            ..Default::default()
        };
        self.store.update(id, changes).await?;

        tracing::info!(%id, "actor updated");
        project(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.soft_delete::<actor::Entity>(id, now_micros()).await?;
        tracing::info!(%id, "actor deleted");
        Ok(())
    }

    pub async fn movies(&self, id: Uuid) -> AppResult<Vec<MovieResponse>> {
        self.store.find_by_id::<actor::Entity>(id).await?;
        let rows = self.store.movies_for_actor(id).await?;
        rows.into_iter().map(movies::project).collect()
    }

    /// Links the actor to a movie and returns the actor's movies.
    pub async fn add_movie(&self, id: Uuid, movie_id: Uuid) -> AppResult<Vec<MovieResponse>> {
        self.store.append_association(id, movie_id).await?;
        self.movies(id).await
    }

    pub async fn awards(&self, id: Uuid) -> AppResult<Vec<AwardResponse>> {
        self.store.find_by_id::<actor::Entity>(id).await?;
        let rows = self.store.awards_for_actor(id).await?;
        rows.into_iter().map(awards::project).collect()
    }
}

pub(crate) fn project(row: actor::Model) -> AppResult<ActorResponse> {
    Ok(ActorResponse {
        id: row.id,
        name: row.name,
        birth_date: row.birth_date.as_deref().map(str::parse::<jiff::civil::Date>).transpose()?,
        biography: row.biography,
        created_at: timestamp(row.created_at)?,
        updated_at: timestamp(row.updated_at)?,
    })
}
