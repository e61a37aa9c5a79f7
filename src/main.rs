//! EcoDash CLI
//!
//! Small demo binary: signs in with a fixed user id, refreshes the
//! dashboard once, and logs the resulting state.

use anyhow::Context;
use ecodash::config::Config;
use ecodash::dashboard::{DashboardStore, StoreConfig};
use ecodash::supabase::{Session, SessionStore, SupabaseClient, SupabaseConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ecodash={}", config.logging.level)),
    );
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("EcoDash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Supabase project: {}", config.supabase.url);

    let user_id: Uuid = std::env::var("ECODASH_USER_ID")
        .context("ECODASH_USER_ID is required")?
        .parse()
        .context("ECODASH_USER_ID must be a UUID")?;

    let client = Arc::new(SupabaseClient::new(SupabaseConfig {
        url: config.supabase.url.clone(),
        anon_key: config.supabase.anon_key.clone(),
        request_timeout_ms: config.supabase.request_timeout_ms,
    })?);

    let session = Arc::new(SessionStore::new());
    session.set_session(Session {
        user_id,
        access_token: String::new(),
    });

    let store = DashboardStore::new(
        client,
        session,
        StoreConfig {
            recommendation_limit: config.dashboard.recommendation_limit,
            event_capacity: config.dashboard.event_capacity,
        },
    );

    // Log every change the refresh produces
    let mut events = store.subscribe();
    let event_logger = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!(event = ?event, "Dashboard changed");
        }
    });

    store.refresh_dashboard().await;

    let state = store.state().await;
    match state.error {
        Some(error) => tracing::error!(%error, "Dashboard refresh failed"),
        None => tracing::info!(
            footprint = state.footprint,
            challenges = state.challenges.len(),
            recommendations = state.recommendations.len(),
            "Dashboard refreshed"
        ),
    }

    event_logger.abort();
    Ok(())
}
