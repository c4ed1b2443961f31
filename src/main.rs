//! bookbound server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bookbound::adapters::http::{app, ClubAppState};
use bookbound::adapters::notifications::LogNotificationSink;
use bookbound::adapters::storage::{InMemoryClubStore, InMemoryRoster};
use bookbound::application::{Newsletter, RoundLocks};
use bookbound::config::AppConfig;
use bookbound::domain::foundation::UserId;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let members: Vec<UserId> = config
        .club
        .members_list()
        .into_iter()
        .filter_map(|member| UserId::new(member).ok())
        .collect();

    let store = Arc::new(InMemoryClubStore::new());
    let newsletter = Arc::new(Newsletter::new(
        Arc::new(LogNotificationSink::new()),
        config.club.base_url.clone(),
    ));
    let state = ClubAppState {
        rounds: store.clone(),
        discussions: store.clone(),
        polls: store.clone(),
        roster: Arc::new(InMemoryRoster::new(members)),
        writer: store,
        locks: Arc::new(RoundLocks::new()),
        newsletter,
    };

    let router = app(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let addr = config.server.socket_addr();
    info!(%addr, club = %config.club.name, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
