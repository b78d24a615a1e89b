//! # Canteen API Client
//!
//! Typed HTTP client for the canteen backend. This crate is the only
//! place in the workspace that talks to the network; everything it hands
//! back has already been normalized into the canonical records defined
//! in `canteen-core`.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven client configuration
//! - **Normalize**: maps heterogeneous server payload shapes into one
//!   canonical internal record immediately after decode
//! - **Clients**: one module per backend resource (tables, reservations,
//!   orders) with thin typed wrappers over `reqwest`
//! - **Mock**: a `mockall` mock of the backend surface for tests of the
//!   layers above

/// Configuration module for client settings
pub mod config;
/// Typed endpoint wrappers for the backend resources
pub mod clients;
/// Mock backend for tests
pub mod mock;
/// Payload normalization at the API boundary
pub mod normalize;

pub use clients::{ApiClient, BackendApi, TableWindow};
pub use config::ApiConfig;
