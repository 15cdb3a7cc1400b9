//! Use-case orchestration: validate, mint, persist, project.
//!
//! Services hold only a [`Store`] handle and never hand storage rows to
//! callers. Each entity module owns its single projection.

mod actors;
mod awards;
mod movies;

pub use actors::ActorService;
pub use awards::AwardService;
pub use movies::MovieService;

use jiff::{Timestamp, civil::Date};

use crate::{error::AppResult, store::Store};

/// Services sharing one store handle.
#[derive(Clone)]
pub struct Services {
    pub actors: ActorService,
    pub movies: MovieService,
    pub awards: AwardService,
}

impl Services {
    pub fn new(store: Store) -> Self {
        Self {
            actors: ActorService::new(store.clone()),
            movies: MovieService::new(store.clone()),
            awards: AwardService::new(store),
        }
    }
}

/// Microseconds since the Unix epoch, the stored timestamp unit.
pub(crate) fn now_micros() -> i64 {
    Timestamp::now().as_microsecond()
}

/// Next `updated_at`, strictly after `previous`.
pub(crate) fn next_update(previous: i64) -> i64 {
    now_micros().max(previous + 1)
}

pub(crate) fn timestamp(micros: i64) -> AppResult<Timestamp> {
    Ok(Timestamp::from_microsecond(micros)?)
}

pub(crate) fn today() -> Date {
    jiff::Zoned::now().date()
}

pub(crate) fn offset(offset: i64) -> i64 {
    offset.max(0)
}
