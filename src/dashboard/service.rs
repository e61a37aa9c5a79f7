//! Data-Service Boundary
//!
//! The dashboard store talks to its backend through [`DashboardService`],
//! so the remote data service stays swappable (and mockable in tests).
//! [`SupabaseClient`] implements it against the `carbon_footprint`,
//! `challenges`, and `recommendations` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::supabase::client::{eq, Order, SupabaseClient, SupabaseError};

use super::types::{Challenge, FootprintRecord, Recommendation};

const FOOTPRINT_TABLE: &str = "carbon_footprint";
const CHALLENGES_TABLE: &str = "challenges";
const RECOMMENDATIONS_TABLE: &str = "recommendations";

/// Remote read/write operations the dashboard needs
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Latest footprint record for the user, `None` when no row exists yet
    async fn latest_footprint(
        &self,
        user_id: Uuid,
    ) -> Result<Option<FootprintRecord>, ServiceError>;

    /// All of the user's challenges with status `active`
    async fn active_challenges(&self, user_id: Uuid) -> Result<Vec<Challenge>, ServiceError>;

    /// The user's most recent recommendations, newest first
    async fn recent_recommendations(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Recommendation>, ServiceError>;

    /// Insert-or-replace a footprint row (already merged with user id and
    /// update timestamp by the caller)
    async fn upsert_footprint(&self, row: Value) -> Result<(), ServiceError>;

    /// Mark a challenge completed and stamp the completion time
    async fn complete_challenge(
        &self,
        challenge_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ServiceError>;
}

/// A failed collaborator operation, carrying its textual description
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Backend(String),
}

impl From<SupabaseError> for ServiceError {
    fn from(e: SupabaseError) -> Self {
        ServiceError::Backend(e.to_string())
    }
}

fn decode<T: serde::de::DeserializeOwned>(row: Value) -> Result<T, ServiceError> {
    serde_json::from_value(row).map_err(|e| ServiceError::Backend(e.to_string()))
}

#[async_trait]
impl DashboardService for SupabaseClient {
    async fn latest_footprint(
        &self,
        user_id: Uuid,
    ) -> Result<Option<FootprintRecord>, ServiceError> {
        let row = self
            .select_single(
                FOOTPRINT_TABLE,
                &[("user_id", eq(user_id))],
                Some(Order::desc("created_at")),
            )
            .await?;

        row.map(decode).transpose()
    }

    async fn active_challenges(&self, user_id: Uuid) -> Result<Vec<Challenge>, ServiceError> {
        let rows = self
            .select(
                CHALLENGES_TABLE,
                &[("user_id", eq(user_id)), ("status", eq("active"))],
                None,
                None,
            )
            .await?;

        rows.into_iter().map(decode).collect()
    }

    async fn recent_recommendations(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        let rows = self
            .select(
                RECOMMENDATIONS_TABLE,
                &[("user_id", eq(user_id))],
                Some(Order::desc("created_at")),
                Some(limit),
            )
            .await?;

        rows.into_iter().map(decode).collect()
    }

    async fn upsert_footprint(&self, row: Value) -> Result<(), ServiceError> {
        self.upsert(FOOTPRINT_TABLE, &row).await?;
        Ok(())
    }

    async fn complete_challenge(
        &self,
        challenge_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        let patch = json!({
            "status": "completed",
            "completed_at": completed_at.to_rfc3339(),
        });

        self.update(CHALLENGES_TABLE, &[("id", eq(challenge_id))], &patch)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_carries_description() {
        let err = ServiceError::Backend("network error".to_string());
        assert_eq!(err.to_string(), "network error");
    }

    #[test]
    fn test_service_error_from_supabase() {
        let err: ServiceError = SupabaseError::Timeout.into();
        assert_eq!(err.to_string(), "Request timeout");

        let err: ServiceError = SupabaseError::Api {
            status: 500,
            code: None,
            message: "internal error".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "internal error");
    }
}
