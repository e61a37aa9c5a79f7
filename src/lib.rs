//! # EcoDash
//!
//! Sustainability Dashboard State Engine - a reactive state container for a
//! user's carbon footprint, challenges, and recommendations, backed by a
//! Supabase data service.
//!
//! ## Features
//!
//! - **Observable state**: footprint total, active challenges, recent
//!   recommendations, loading flag, last error
//! - **Three operations**: refresh, save footprint, complete challenge
//! - **Change events**: broadcast channel a view layer can subscribe to
//! - **Swappable backend**: the data service is a trait seam
//!
//! ## Modules
//!
//! - [`dashboard`]: the state container, records, events, and service seam
//! - [`supabase`]: PostgREST client and session provider
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecodash::config::Config;
//! use ecodash::dashboard::{DashboardStore, StoreConfig};
//! use ecodash::supabase::{SessionStore, Session, SupabaseClient, SupabaseConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!
//!     let client = Arc::new(SupabaseClient::new(SupabaseConfig {
//!         url: config.supabase.url.clone(),
//!         anon_key: config.supabase.anon_key.clone(),
//!         request_timeout_ms: config.supabase.request_timeout_ms,
//!     })?);
//!
//!     let session = Arc::new(SessionStore::new());
//!     session.set_session(Session {
//!         user_id: uuid::Uuid::new_v4(),
//!         access_token: String::new(),
//!     });
//!
//!     let store = DashboardStore::new(client, session, StoreConfig::default());
//!
//!     let _events = store.subscribe();
//!     store.refresh_dashboard().await;
//!
//!     let state = store.state().await;
//!     println!("footprint: {} kg CO2e", state.footprint);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod supabase;

// Re-export top-level types for convenience
pub use dashboard::{
    ActionResult, Challenge, ChallengeStatus, DashboardEvent, DashboardService, DashboardState,
    DashboardStore, FootprintRecord, Recommendation, ServiceError, StoreConfig,
};

pub use supabase::{
    Session, SessionProvider, SessionStore, StaticSession, SupabaseClient, SupabaseConfig,
    SupabaseError,
};

pub use config::{Config, ConfigError, DashboardSettings, LoggingConfig, SupabaseSettings};
