//! Supabase Collaborators
//!
//! This module owns the two external collaborator boundaries:
//! - [`client`]: PostgREST client for the remote structured-data service
//! - [`auth`]: session provider exposing the current user identity

pub mod auth;
pub mod client;

pub use auth::{Session, SessionProvider, SessionStore, StaticSession};
pub use client::{eq, Order, SupabaseClient, SupabaseConfig, SupabaseError};
