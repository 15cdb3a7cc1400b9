//! Sample catalog installed on first start.

use jiff::civil::{Date, date};
use sea_orm::{EntityTrait, Set, TransactionTrait};

use crate::{
    entities::{actor, award, movie, movie_actor},
    error::AppResult,
    id,
    services::now_micros,
    store::Store,
};

struct SeedActor {
    name: &'static str,
    birth_date: Date,
    biography: &'static str,
}

struct SeedMovie {
    title: &'static str,
    release_year: i32,
    director: &'static str,
    genre: &'static str,
    description: &'static str,
    rating_tenths: i16,
}

struct SeedAward {
    name: &'static str,
    category: &'static str,
    year: i32,
    /// Indices into the seeded movies and actors.
    movie: usize,
    actor: usize,
    description: &'static str,
}

const ACTORS: [SeedActor; 3] = [
    SeedActor {
        name: "Tom Hanks",
        birth_date: date(1956, 7, 9),
        biography: "American actor and filmmaker known for both comedic and dramatic roles.",
    },
    SeedActor {
        name: "Meryl Streep",
        birth_date: date(1949, 6, 22),
        biography: "American actress with a record number of Academy Award nominations.",
    },
    SeedActor {
        name: "Leonardo DiCaprio",
        birth_date: date(1974, 11, 11),
        biography: "American actor and producer known for work in biopics and period films.",
    },
];

const MOVIES: [SeedMovie; 3] = [
    SeedMovie {
        title: "Forrest Gump",
        release_year: 1994,
        director: "Robert Zemeckis",
        genre: "Drama",
        description: "A slow-witted but kind-hearted man witnesses decades of American history.",
        rating_tenths: 88,
    },
    SeedMovie {
        title: "The Devil Wears Prada",
        release_year: 2006,
        director: "David Frankel",
        genre: "Comedy",
        description: "A young journalist lands a job as assistant to a demanding fashion editor.",
        rating_tenths: 69,
    },
    SeedMovie {
        title: "The Revenant",
        release_year: 2015,
        director: "Alejandro G. Inarritu",
        genre: "Adventure",
        description: "A frontiersman fights for survival after being left for dead.",
        rating_tenths: 80,
    },
];

const AWARDS: [SeedAward; 3] = [
    SeedAward {
        name: "Academy Award",
        category: "Best Actor",
        year: 1995,
        movie: 0,
        actor: 0,
        description: "Awarded for the role of Forrest Gump.",
    },
    SeedAward {
        name: "Golden Globe Award",
        category: "Best Actress - Musical or Comedy",
        year: 2007,
        movie: 1,
        actor: 1,
        description: "Awarded for the role of Miranda Priestly.",
    },
    SeedAward {
        name: "Academy Award",
        category: "Best Actor",
        year: 2016,
        movie: 2,
        actor: 2,
        description: "Awarded for the role of Hugh Glass.",
    },
];

/// Installs the sample catalog when the actor table holds no rows at all.
/// Returns whether anything was installed.
pub async fn seed_if_empty(store: &Store) -> AppResult<bool> {
    let existing = store.count::<actor::Entity>().await?;
    if existing > 0 {
        tracing::debug!(actors = existing, "catalog present, skipping seed");
        return Ok(false);
    }

    let now = now_micros();
    let txn = store.db().begin().await?;

    let mut actor_ids = Vec::with_capacity(ACTORS.len());
    for seed in &ACTORS {
        let id = id::mint();
        let row = actor::ActiveModel {
            id: Set(id),
            name: Set(seed.name.to_string()),
            birth_date: Set(Some(seed.birth_date.to_string())),
            biography: Set(seed.biography.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        actor::Entity::insert(row).exec_without_returning(&txn).await?;
        actor_ids.push(id);
    }

    let mut movie_ids = Vec::with_capacity(MOVIES.len());
    for seed in &MOVIES {
        let id = id::mint();
        let row = movie::ActiveModel {
            id: Set(id),
            title: Set(seed.title.to_string()),
            release_year: Set(seed.release_year),
            director: Set(seed.director.to_string()),
            genre: Set(seed.genre.to_string()),
            description: Set(seed.description.to_string()),
            rating_tenths: Set(Some(seed.rating_tenths)),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        movie::Entity::insert(row).exec_without_returning(&txn).await?;
        movie_ids.push(id);
    }

    for seed in &AWARDS {
        let row = award::ActiveModel {
            id: Set(id::mint()),
            name: Set(seed.name.to_string()),
            category: Set(seed.category.to_string()),
            year: Set(seed.year),
            movie_id: Set(Some(movie_ids[seed.movie])),
            actor_id: Set(Some(actor_ids[seed.actor])),
            description: Set(seed.description.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        award::Entity::insert(row).exec_without_returning(&txn).await?;
    }

    for (actor_id, movie_id) in actor_ids.iter().zip(&movie_ids) {
        let link = movie_actor::ActiveModel { movie_id: Set(*movie_id), actor_id: Set(*actor_id) };
        movie_actor::Entity::insert(link).exec_without_returning(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(
        actors = ACTORS.len(),
        movies = MOVIES.len(),
        awards = AWARDS.len(),
        "sample catalog installed"
    );
    Ok(true)
}
