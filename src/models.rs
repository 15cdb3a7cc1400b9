//! Request and response records. These are the only shapes that cross the
//! HTTP boundary; storage rows never do.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActorRequest {
    pub name: String,
    pub birth_date: Option<Date>,
    pub biography: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActorResponse {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<Date>,
    pub biography: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieRequest {
    pub title: String,
    pub release_year: i32,
    pub director: String,
    pub genre: String,
    pub description: String,
    /// 0.0..=10.0, one fractional digit.
    pub rating: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub release_year: i32,
    pub director: String,
    pub genre: String,
    pub description: String,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AwardRequest {
    pub name: String,
    pub category: String,
    pub year: i32,
    pub movie_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AwardResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub year: i32,
    pub movie_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Clone, Debug, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}
