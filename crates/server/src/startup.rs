use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::repo::seaorm::SeaOrmAccountRepository;
use service::auth::repository::{memory::InMemoryAccountRepository, AccountRepository};
use service::auth::AuthService;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the account store: PostgreSQL (migrated on startup) when a database
/// URL is configured, otherwise an in-process map.
async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn AccountRepository>, StartupError> {
    if !cfg.database.is_configured() {
        warn!("no database configured; accounts are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryAccountRepository::new()));
    }
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Storage(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Storage(e.to_string()))?;
    info!("account store migrated");
    Ok(Arc::new(SeaOrmAccountRepository::new(db)))
}

/// Build shared handler state. A missing signing secret fails here, before
/// any request is accepted.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let (hasher, tokens) = AuthService::credentials_from_config(&cfg.auth)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let repo = build_repository(cfg).await?;
    Ok(ServerState { auth: AuthService::new(repo, hasher, tokens) })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app from validated config and serve until the
/// listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting identity server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
