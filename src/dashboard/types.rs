//! Dashboard Record Types
//!
//! Rows owned by the external schema. Only the columns the dashboard reads
//! are typed; everything else rides along in `extra` so records survive
//! schema additions untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A recorded carbon footprint total for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    /// Aggregate emissions total; 0 when the column is absent
    #[serde(default)]
    pub total_emissions: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Columns the dashboard does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Lifecycle status of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Completed,
}

/// A sustainability challenge joined by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,

    pub status: ChallengeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A suggested action for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Outcome of a mutating store operation, returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    /// Successful outcome
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed outcome with the failure's description
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
