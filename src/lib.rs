//! gmdb: movie, actor and award catalog over HTTP.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod id;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;
pub mod validate;

use std::sync::Arc;

use crate::{config::Config, services::Services, store::Store};

/// Handles built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub services: Services,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Store) -> Self {
        let services = Services::new(store.clone());
        Self { config, store, services }
    }
}
