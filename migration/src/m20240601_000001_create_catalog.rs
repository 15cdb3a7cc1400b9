use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

// No foreign keys: award references and the movie/actor join are left dangling
// when their subject is soft-deleted.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(uuid(Actors::Id).primary_key())
                    .col(string(Actors::Name))
                    .col(string_null(Actors::BirthDate))
                    .col(text(Actors::Biography))
                    .col(big_integer(Actors::CreatedAt))
                    .col(big_integer(Actors::UpdatedAt))
                    .col(big_integer_null(Actors::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actors_deleted_at")
                    .table(Actors::Table)
                    .col(Actors::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(uuid(Movies::Id).primary_key())
                    .col(string(Movies::Title))
                    .col(integer(Movies::ReleaseYear))
                    .col(string(Movies::Director))
                    .col(string(Movies::Genre))
                    .col(text(Movies::Description))
                    .col(small_integer_null(Movies::RatingTenths))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .col(big_integer_null(Movies::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_deleted_at")
                    .table(Movies::Table)
                    .col(Movies::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Awards::Table)
                    .if_not_exists()
                    .col(uuid(Awards::Id).primary_key())
                    .col(string(Awards::Name))
                    .col(string(Awards::Category))
                    .col(integer(Awards::Year))
                    .col(uuid_null(Awards::MovieId))
                    .col(uuid_null(Awards::ActorId))
                    .col(text(Awards::Description))
                    .col(big_integer(Awards::CreatedAt))
                    .col(big_integer(Awards::UpdatedAt))
                    .col(big_integer_null(Awards::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_awards_deleted_at")
                    .table(Awards::Table)
                    .col(Awards::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieActors::Table)
                    .if_not_exists()
                    .col(uuid(MovieActors::MovieId))
                    .col(uuid(MovieActors::ActorId))
                    .primary_key(
                        Index::create().col(MovieActors::MovieId).col(MovieActors::ActorId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actors_actor_id")
                    .table(MovieActors::Table)
                    .col(MovieActors::ActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MovieActors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Awards::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actors::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Actors {
    Table,
    Id,
    Name,
    BirthDate,
    Biography,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    ReleaseYear,
    Director,
    Genre,
    Description,
    RatingTenths,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Awards {
    Table,
    Id,
    Name,
    Category,
    Year,
    MovieId,
    ActorId,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum MovieActors {
    Table,
    MovieId,
    ActorId,
}
