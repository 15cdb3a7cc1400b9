use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use super::{next_update, now_micros, timestamp, today};
use crate::{
    entities::{Audited, actor, award, movie},
    error::{AppError, AppResult},
    id,
    models::{AwardRequest, AwardResponse},
    store::Store,
    validate,
};

#[derive(Clone)]
pub struct AwardService {
    store: Store,
}

impl AwardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, req: AwardRequest) -> AppResult<AwardResponse> {
        validate::award(&req, today())?;
        self.check_references(&req).await?;

        let now = now_micros();
        let row = award::Model {
            id: id::mint(),
            name: req.name,
            category: req.category,
            year: req.year,
            movie_id: req.movie_id,
            actor_id: req.actor_id,
            description: req.description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.store.insert(award::ActiveModel::from(row.clone()).reset_all()).await?;

        tracing::info!(id = %row.id, name = %row.name, "award created");
        project(row)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<AwardResponse> {
        project(self.store.find_by_id::<award::Entity>(id).await?)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<AwardResponse>> {
        let rows = self.store.list::<award::Entity>(limit, super::offset(offset)).await?;
        rows.into_iter().map(project).collect()
    }

    pub async fn update(&self, id: Uuid, req: AwardRequest) -> AppResult<AwardResponse> {
        let mut row = self.store.find_by_id::<award::Entity>(id).await?;
        validate::award(&req, today())?;
        self.check_references(&req).await?;

        row.name = req.name;
        row.category = req.category;
        row.year = req.year;
        row.movie_id = req.movie_id;
        row.actor_id = req.actor_id;
        row.description = req.description;
        row.updated_at = next_update(row.updated_at);

        let changes = award::ActiveModel {
            name: Set(row.name.clone()),
            category: Set(row.category.clone()),
            year: Set(row.year),
            movie_id: Set(row.movie_id),
            actor_id: Set(row.actor_id),
            description: Set(row.description.clone()),
            updated_at: Set(row.updated_at),
            ..Default::default()
        };
        self.store.update(id, changes).await?;

        tracing::info!(%id, "award updated");
        project(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.soft_delete::<award::Entity>(id, now_micros()).await?;
        tracing::info!(%id, "award deleted");
        Ok(())
    }

    /// References must name live subjects when written; later deletions of
    /// the subject leave them dangling.
    async fn check_references(&self, req: &AwardRequest) -> AppResult<()> {
        if let Some(movie_id) = req.movie_id {
            self.require_live::<movie::Entity>("movie_id", movie_id).await?;
        }
        if let Some(actor_id) = req.actor_id {
            self.require_live::<actor::Entity>("actor_id", actor_id).await?;
        }
        Ok(())
    }

    async fn require_live<E: Audited>(&self, field: &str, id: Uuid) -> AppResult<()> {
        match self.store.find_by_id::<E>(id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound(label)) => Err(AppError::Validation(format!(
                "award {field} does not reference a live {label}"
            ))),
            Err(err) => Err(err),
        }
    }
}

pub(crate) fn project(row: award::Model) -> AppResult<AwardResponse> {
    Ok(AwardResponse {
        id: row.id,
        name: row.name,
        category: row.category,
        year: row.year,
        movie_id: row.movie_id,
        actor_id: row.actor_id,
        description: row.description,
        created_at: timestamp(row.created_at)?,
        updated_at: timestamp(row.updated_at)?,
    })
}
