//! Persistence port behaviour against an in-memory database.

mod common;

use gmdb::{
    entities::{actor, movie},
    error::AppError,
    id,
    store::Store,
};
use std::time::Duration;

use sea_orm::{Set, TransactionTrait};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn store() -> Store {
    common::test_state().await.store.clone()
}

async fn insert_actor(store: &Store, name: &str) -> Uuid {
    let id = id::mint();
    let row = actor::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        birth_date: Set(None),
        biography: Set(String::new()),
        created_at: Set(1),
        updated_at: Set(1),
        deleted_at: Set(None),
    };
    store.insert(row).await.unwrap();
    id
}

async fn insert_movie(store: &Store, title: &str) -> Uuid {
    let id = id::mint();
    let row = movie::ActiveModel {
        id: Set(id),
        title: Set(title.to_string()),
        release_year: Set(2000),
        director: Set(String::new()),
        genre: Set(String::new()),
        description: Set(String::new()),
        rating_tenths: Set(None),
        created_at: Set(1),
        updated_at: Set(1),
        deleted_at: Set(None),
    };
    store.insert(row).await.unwrap();
    id
}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, AppError>, label: &str) {
    match result {
        Err(AppError::NotFound(found)) => assert_eq!(found, label),
        other => panic!("expected {label} not found, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_every_insert_in_id_order() {
    let store = store().await;
    for i in 0..5 {
        insert_actor(&store, &format!("Actor {i}")).await;
    }

    let rows = store.list::<actor::Entity>(0, 0).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.windows(2).all(|w| w[0].id <= w[1].id));
}

#[tokio::test]
async fn list_clamps_paging() {
    let store = store().await;
    for i in 0..4 {
        insert_actor(&store, &format!("Actor {i}")).await;
    }

    assert_eq!(store.list::<actor::Entity>(-1, -5).await.unwrap().len(), 4);
    assert_eq!(store.list::<actor::Entity>(2, 0).await.unwrap().len(), 2);
    assert_eq!(store.list::<actor::Entity>(0, 3).await.unwrap().len(), 1);
    assert!(store.list::<actor::Entity>(10, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_deleted_rows_are_invisible() {
    let store = store().await;
    let keep = insert_actor(&store, "Keep").await;
    let gone = insert_actor(&store, "Gone").await;

    store.soft_delete::<actor::Entity>(gone, 42).await.unwrap();

    assert_not_found(store.find_by_id::<actor::Entity>(gone).await, "actor");
    let rows = store.list::<actor::Entity>(0, 0).await.unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![keep]);

    // the row itself is retained
    assert_eq!(store.count::<actor::Entity>().await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn soft_delete_succeeds_once() {
    let store = store().await;
    let id = insert_actor(&store, "Once").await;

    store.soft_delete::<actor::Entity>(id, 10).await.unwrap();
    assert_not_found(store.soft_delete::<actor::Entity>(id, 11).await, "actor");
    assert_not_found(store.soft_delete::<actor::Entity>(Uuid::nil(), 11).await, "actor");
}

#[tokio::test]
async fn update_of_deleted_row_is_not_found() {
    let store = store().await;
    let id = insert_movie(&store, "Old").await;

    let changes = movie::ActiveModel { title: Set("New".to_string()), ..Default::default() };
    store.update(id, changes.clone()).await.unwrap();
    assert_eq!(store.find_by_id::<movie::Entity>(id).await.unwrap().title, "New");

    store.soft_delete::<movie::Entity>(id, 5).await.unwrap();
    assert_not_found(store.update(id, changes).await, "movie");
}

#[tokio::test]
async fn insert_accepts_dangling_references() {
    let store = store().await;
    let row = gmdb::entities::award::ActiveModel {
        id: Set(id::mint()),
        name: Set("Orphan".to_string()),
        category: Set(String::new()),
        year: Set(2001),
        movie_id: Set(Some(Uuid::nil())),
        actor_id: Set(None),
        description: Set(String::new()),
        created_at: Set(1),
        updated_at: Set(1),
        deleted_at: Set(None),
    };
    store.insert(row).await.unwrap();
    assert_eq!(store.awards_for_movie(Uuid::nil()).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn append_association_is_idempotent() {
    let store = store().await;
    let actor_id = insert_actor(&store, "Tom Hanks").await;
    let movie_id = insert_movie(&store, "Big").await;

    store.append_association(actor_id, movie_id).await.unwrap();
    store.append_association(actor_id, movie_id).await.unwrap();

    let movies = store.movies_for_actor(actor_id).await.unwrap();
    assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![movie_id]);
    let actors = store.actors_for_movie(movie_id).await.unwrap();
    assert_eq!(actors.iter().map(|a| a.id).collect::<Vec<_>>(), vec![actor_id]);
}

#[tokio::test]
async fn append_association_requires_live_sides() {
    let store = store().await;
    let actor_id = insert_actor(&store, "Tom Hanks").await;
    let movie_id = insert_movie(&store, "Big").await;

    store.soft_delete::<movie::Entity>(movie_id, 3).await.unwrap();
    assert_not_found(store.append_association(actor_id, movie_id).await, "movie");
    assert_not_found(store.append_association(Uuid::nil(), movie_id).await, "actor");
}

#[tokio::test]
async fn association_reads_skip_deleted_partners() {
    let store = store().await;
    let actor_id = insert_actor(&store, "Tom Hanks").await;
    let big = insert_movie(&store, "Big").await;
    let splash = insert_movie(&store, "Splash").await;

    store.append_association(actor_id, big).await.unwrap();
    store.append_association(actor_id, splash).await.unwrap();
    store.soft_delete::<movie::Entity>(big, 9).await.unwrap();

    let movies = store.movies_for_actor(actor_id).await.unwrap();
    assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![splash]);
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[tokio::test]
async fn calls_past_the_statement_deadline_fail_as_storage_timeout() {
    let store = store().await;
    let deadline = Duration::from_millis(50);
    let bounded = Store::new(store.db().clone(), deadline);

    // The in-memory pool has one connection; holding it stalls every call.
    let txn = store.db().begin().await.unwrap();

    match bounded.find_by_id::<actor::Entity>(Uuid::nil()).await {
        Err(AppError::StorageTimeout(d)) => assert_eq!(d, deadline),
        other => panic!("expected storage timeout, got {other:?}"),
    }
    match bounded.list::<movie::Entity>(0, 0).await {
        Err(AppError::StorageTimeout(_)) => {}
        other => panic!("expected storage timeout, got {other:?}"),
    }

    txn.rollback().await.unwrap();
    assert!(bounded.list::<movie::Entity>(0, 0).await.unwrap().is_empty());
}
