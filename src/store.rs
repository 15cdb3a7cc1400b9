//! Persistence port over the catalog tables.
//!
//! Reads never see soft-deleted rows. Writes do not check optional references;
//! dangling award references and join rows are tolerated.

use std::{future::Future, time::Duration};

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use crate::{
    entities::{Audited, actor, award, movie, movie_actor},
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
    statement_timeout: Duration,
}

impl Store {
    pub fn new(db: DatabaseConnection, statement_timeout: Duration) -> Self {
        Self { db, statement_timeout }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Creates or updates the schema. Declares no foreign keys.
    pub async fn migrate(&self) -> AppResult<()> {
        self.bounded(Migrator::up(&self.db, None)).await
    }

    pub async fn close(self) -> AppResult<()> {
        self.db.close().await?;
        Ok(())
    }

    pub async fn insert<A>(&self, row: A) -> AppResult<()>
    where
        A: ActiveModelTrait + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        self.bounded(<A::Entity as EntityTrait>::insert(row).exec_without_returning(&self.db))
            .await?;
        Ok(())
    }

    pub async fn find_by_id<E: Audited>(&self, id: Uuid) -> AppResult<E::Model> {
        let query = E::find()
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null());

        self.bounded(query.one(&self.db)).await?.ok_or(AppError::NotFound(E::LABEL))
    }

    /// Live rows in ascending id order. `limit <= 0` means no cap.
    pub async fn list<E: Audited>(&self, limit: i64, offset: i64) -> AppResult<Vec<E::Model>> {
        // SQLite rejects OFFSET without LIMIT, so "no cap" is the largest bindable limit.
        let limit = if limit > 0 { limit as u64 } else { i64::MAX as u64 };
        let mut query = E::find()
            .filter(E::deleted_at_column().is_null())
            .order_by_asc(E::id_column())
            .limit(limit);
        if offset > 0 {
            query = query.offset(offset as u64);
        }

        self.bounded(query.all(&self.db)).await
    }

    /// Overwrites the columns set on `row` for a live row.
    pub async fn update<A>(&self, id: Uuid, row: A) -> AppResult<()>
    where
        A: ActiveModelTrait + Send,
        A::Entity: Audited,
    {
        let entity_update = <A::Entity as EntityTrait>::update_many()
            .set(row)
            .filter(A::Entity::id_column().eq(id))
            .filter(A::Entity::deleted_at_column().is_null());

        let result = self.bounded(entity_update.exec(&self.db)).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(A::Entity::LABEL));
        }
        Ok(())
    }

    pub async fn soft_delete<E: Audited>(&self, id: Uuid, at: i64) -> AppResult<()> {
        let retire = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(at))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null());

        let result = self.bounded(retire.exec(&self.db)).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(E::LABEL));
        }
        Ok(())
    }

    /// Physical row count, soft-deleted rows included.
    pub async fn count<E: Audited>(&self) -> AppResult<u64>
    where
        E::Model: Sync + 'static,
    {
        self.bounded(E::find().count(&self.db)).await
    }

    /// Links an actor and a movie. Linking an existing pair is a no-op.
    pub async fn append_association(&self, actor_id: Uuid, movie_id: Uuid) -> AppResult<()> {
        self.find_by_id::<actor::Entity>(actor_id).await?;
        self.find_by_id::<movie::Entity>(movie_id).await?;

        let link = movie_actor::ActiveModel { movie_id: Set(movie_id), actor_id: Set(actor_id) };
        let insert = movie_actor::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([movie_actor::Column::MovieId, movie_actor::Column::ActorId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db);

        match self.bounded(insert).await {
            Ok(inserted) => {
                tracing::debug!(%actor_id, %movie_id, inserted, "association appended");
                Ok(())
            }
            Err(AppError::Storage(DbErr::RecordNotInserted)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    pub async fn movies_for_actor(&self, actor_id: Uuid) -> AppResult<Vec<movie::Model>> {
        let links = movie_actor::Entity::find()
            .filter(movie_actor::Column::ActorId.eq(actor_id))
            .all(&self.db);
        let ids: Vec<Uuid> = self.bounded(links).await?.into_iter().map(|l| l.movie_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let movies = movie::Entity::find()
            .filter(movie::Column::Id.is_in(ids))
            .filter(movie::Column::DeletedAt.is_null())
            .order_by_asc(movie::Column::Id)
            .all(&self.db);
        self.bounded(movies).await
    }

    pub async fn actors_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<actor::Model>> {
        let links = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .all(&self.db);
        let ids: Vec<Uuid> = self.bounded(links).await?.into_iter().map(|l| l.actor_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let actors = actor::Entity::find()
            .filter(actor::Column::Id.is_in(ids))
            .filter(actor::Column::DeletedAt.is_null())
            .order_by_asc(actor::Column::Id)
            .all(&self.db);
        self.bounded(actors).await
    }

    pub async fn awards_for_actor(&self, actor_id: Uuid) -> AppResult<Vec<award::Model>> {
        self.awards_where(award::Column::ActorId, actor_id).await
    }

    pub async fn awards_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<award::Model>> {
        self.awards_where(award::Column::MovieId, movie_id).await
    }

    async fn awards_where(&self, column: award::Column, id: Uuid) -> AppResult<Vec<award::Model>> {
        let awards = award::Entity::find()
            .filter(column.eq(id))
            .filter(award::Column::DeletedAt.is_null())
            .order_by_asc(award::Column::Id)
            .all(&self.db);
        self.bounded(awards).await
    }

    /// Runs one storage call under the statement deadline. Expiry drops the
    /// in-flight statement.
    async fn bounded<T, F>(&self, call: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.statement_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::StorageTimeout(self.statement_timeout)),
        }
    }
}
