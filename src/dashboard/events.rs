//! Dashboard Change Events
//!
//! Published on a broadcast channel whenever a store field changes, so a
//! view layer can react without polling state.

use serde::Serialize;

use super::types::{Challenge, Recommendation};

/// A change to one observable dashboard field
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The loading flag flipped
    Loading { active: bool },
    /// The footprint total was replaced
    FootprintUpdated { total_emissions: f64 },
    /// The full challenge collection was replaced
    ChallengesUpdated { challenges: Vec<Challenge> },
    /// The full recommendation collection was replaced
    RecommendationsUpdated { recommendations: Vec<Recommendation> },
    /// The error field changed (`None` when cleared)
    ErrorChanged { message: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_event_serialize() {
        let json = serde_json::to_string(&DashboardEvent::Loading { active: true }).unwrap();
        assert_eq!(json, r#"{"type":"loading","active":true}"#);
    }

    #[test]
    fn test_footprint_event_serialize() {
        let json = serde_json::to_string(&DashboardEvent::FootprintUpdated {
            total_emissions: 42.0,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"footprint_updated\""));
        assert!(json.contains("\"total_emissions\":42.0"));
    }

    #[test]
    fn test_error_event_serialize() {
        let json = serde_json::to_string(&DashboardEvent::ErrorChanged {
            message: Some("network error".to_string()),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"error_changed","message":"network error"}"#
        );

        let cleared =
            serde_json::to_string(&DashboardEvent::ErrorChanged { message: None }).unwrap();
        assert_eq!(cleared, r#"{"type":"error_changed","message":null}"#);
    }
}
