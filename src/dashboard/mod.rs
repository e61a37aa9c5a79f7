//! Dashboard State Container
//!
//! Reactive state for a user's sustainability dashboard:
//! - [`types`]: footprint, challenge, and recommendation records
//! - [`service`]: the data-service collaborator boundary
//! - [`events`]: change notifications for a view layer
//! - [`store`]: the state container and its three operations

pub mod events;
pub mod service;
pub mod store;
pub mod types;

pub use events::DashboardEvent;
pub use service::{DashboardService, ServiceError};
pub use store::{DashboardState, DashboardStore, StoreConfig};
pub use types::{ActionResult, Challenge, ChallengeStatus, FootprintRecord, Recommendation};
