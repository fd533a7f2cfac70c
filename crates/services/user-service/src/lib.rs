//! User Service Library
//!
//! A CRUD REST service for users keyed by login, backed by a single
//! `users` table. Components are wired by hand at startup:
//! database → [`repository::UserStore`] → [`state::AppState`] → router.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::User;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{UserRepository, UserStore};
use crate::routes::create_router;
use crate::state::AppState;

/// Create the schema, reseed the table and log what was stored.
///
/// Must finish before the listener accepts its first request.
pub async fn initialize(users: &dyn UserRepository) -> AppResult<Vec<User>> {
    users.init().await?;

    let seeded = users.find_all().await?;
    for user in &seeded {
        info!("{:?}", user);
    }

    Ok(seeded)
}

/// Connect to the database and build the repository.
async fn connect_repository(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserRepository>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    Ok(Arc::new(UserStore::new(db.get_connection())))
}

/// Run the startup phase only (for CLI commands).
pub async fn run_init(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let users = connect_repository(&config).await?;
    let seeded = initialize(users.as_ref()).await?;
    info!("Database initialized with {} users", seeded.len());
    Ok(())
}

/// Run the HTTP server with the given configuration.
///
/// A failed startup phase aborts before anything is bound.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let users = connect_repository(&config).await?;
    initialize(users.as_ref()).await?;

    let state = AppState::new(users);
    let app = create_router(state, config.variant);

    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(variant = ?config.variant, "User service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
