//! Dashboard Store
//!
//! The state container behind the dashboard view: five observable fields,
//! three operations, one event channel. Constructed once by the host and
//! handed to consumers; there is no global instance.
//!
//! Operations are not serialized against each other. Two calls racing each
//! other interleave their field writes and the last completion wins.

use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

use crate::supabase::auth::SessionProvider;

use super::events::DashboardEvent;
use super::service::{DashboardService, ServiceError};
use super::types::{ActionResult, Challenge, Recommendation};

/// Configuration for the dashboard store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How many recent recommendations to fetch and hold
    pub recommendation_limit: usize,
    /// Capacity of the change-event broadcast channel
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: 5,
            event_capacity: 64,
        }
    }
}

/// The observable dashboard fields
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Most recent recorded total emissions, 0 until a row exists
    pub footprint: f64,
    /// The user's currently active challenges
    pub challenges: Vec<Challenge>,
    /// Most recent recommendations, newest first
    pub recommendations: Vec<Recommendation>,
    /// True only while an operation is in flight
    pub loading: bool,
    /// Description of the last failure, if any
    pub error: Option<String>,
}

/// Reactive state container for a user's sustainability dashboard
pub struct DashboardStore {
    service: Arc<dyn DashboardService>,
    session: Arc<dyn SessionProvider>,
    state: Arc<RwLock<DashboardState>>,
    events: broadcast::Sender<DashboardEvent>,
    config: StoreConfig,
}

#[derive(Debug, Error)]
enum OpError {
    #[error("no authenticated user")]
    NoUser,

    #[error("footprint record must be a JSON object")]
    InvalidRecord,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl DashboardStore {
    /// Create a new store with its collaborators injected
    pub fn new(
        service: Arc<dyn DashboardService>,
        session: Arc<dyn SessionProvider>,
        config: StoreConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);

        Self {
            service,
            session,
            state: Arc::new(RwLock::new(DashboardState::default())),
            events,
            config,
        }
    }

    /// Subscribe to field-change events
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Current footprint total
    pub async fn footprint(&self) -> f64 {
        self.state.read().await.footprint
    }

    /// Whether an operation is in flight
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Description of the last failure, if any
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Re-fetch all three dashboard collections for the current user
    ///
    /// A missing footprint row is not a failure: the total resolves to 0
    /// and the remaining reads still run. Any other failure aborts the
    /// remaining reads and lands in the error field; fields assigned before
    /// the failure keep their new values.
    pub async fn refresh_dashboard(&self) {
        self.set_loading(true).await;
        self.set_error(None).await;

        if let Err(e) = self.run_refresh().await {
            tracing::warn!(error = %e, "Dashboard refresh failed");
            self.set_error(Some(e.to_string())).await;
        }

        self.set_loading(false).await;
    }

    async fn run_refresh(&self) -> Result<(), OpError> {
        let user_id = self.session.current_user_id().ok_or(OpError::NoUser)?;

        let footprint = self.service.latest_footprint(user_id).await?;
        let total = footprint.map(|r| r.total_emissions).unwrap_or(0.0);
        self.set_footprint(total).await;

        let challenges = self.service.active_challenges(user_id).await?;
        self.set_challenges(challenges).await;

        let recommendations = self
            .service
            .recent_recommendations(user_id, self.config.recommendation_limit)
            .await?;
        self.set_recommendations(recommendations).await;

        tracing::debug!(user_id = %user_id, "Dashboard refreshed");
        Ok(())
    }

    /// Save a footprint record fragment for the current user
    ///
    /// The fragment is merged with the user id and a fresh `updated_at`
    /// before the upsert; the external schema owns its shape beyond that.
    /// A successful save re-fetches all three collections.
    pub async fn save_footprint(&self, record: Value) -> ActionResult {
        self.set_loading(true).await;
        self.set_error(None).await;

        let result = match self.run_save(record).await {
            Ok(()) => ActionResult::ok(),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "Footprint save failed");
                self.set_error(Some(message.clone())).await;
                ActionResult::failed(message)
            }
        };

        self.set_loading(false).await;
        result
    }

    async fn run_save(&self, record: Value) -> Result<(), OpError> {
        let user_id = self.session.current_user_id().ok_or(OpError::NoUser)?;

        let mut row = match record {
            Value::Object(map) => map,
            _ => return Err(OpError::InvalidRecord),
        };
        row.insert("user_id".to_string(), Value::String(user_id.to_string()));
        row.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        self.service.upsert_footprint(Value::Object(row)).await?;

        // The refresh handles its own failures through the error field
        self.refresh_dashboard().await;
        Ok(())
    }

    /// Mark a challenge completed and re-fetch the dashboard
    ///
    /// Unlike the other two operations this does not clear a pre-existing
    /// error before the update attempt.
    pub async fn complete_challenge(&self, challenge_id: i64) -> ActionResult {
        self.set_loading(true).await;

        let result = match self.run_complete(challenge_id).await {
            Ok(()) => ActionResult::ok(),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(challenge_id, error = %message, "Challenge completion failed");
                self.set_error(Some(message.clone())).await;
                ActionResult::failed(message)
            }
        };

        self.set_loading(false).await;
        result
    }

    async fn run_complete(&self, challenge_id: i64) -> Result<(), OpError> {
        self.session.current_user_id().ok_or(OpError::NoUser)?;

        self.service
            .complete_challenge(challenge_id, Utc::now())
            .await?;

        tracing::info!(challenge_id, "Challenge completed");
        self.refresh_dashboard().await;
        Ok(())
    }

    async fn set_loading(&self, active: bool) {
        self.state.write().await.loading = active;
        self.publish(DashboardEvent::Loading { active });
    }

    async fn set_error(&self, message: Option<String>) {
        self.state.write().await.error = message.clone();
        self.publish(DashboardEvent::ErrorChanged { message });
    }

    async fn set_footprint(&self, total_emissions: f64) {
        self.state.write().await.footprint = total_emissions;
        self.publish(DashboardEvent::FootprintUpdated { total_emissions });
    }

    async fn set_challenges(&self, challenges: Vec<Challenge>) {
        self.state.write().await.challenges = challenges.clone();
        self.publish(DashboardEvent::ChallengesUpdated { challenges });
    }

    async fn set_recommendations(&self, recommendations: Vec<Recommendation>) {
        self.state.write().await.recommendations = recommendations.clone();
        self.publish(DashboardEvent::RecommendationsUpdated { recommendations });
    }

    fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
