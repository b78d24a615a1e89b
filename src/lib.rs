//! # Canteen
//!
//! Client-side reservation core of the school food-ordering system:
//! slot generation, availability classification, the table-selection
//! state machine, and the durable local mirror of the committed
//! selection. The UI layer consumes this workspace through
//! [`AppContext`] and the re-exported crates.

pub use canteen_api::{ApiClient, ApiConfig};
pub use canteen_session::SelectionSession;
pub use canteen_store::FileStore;

use std::env;

use chrono::Local;
use eyre::Result;

/// Default location of the durable session snapshot.
const DEFAULT_SNAPSHOT_PATH: &str = "canteen-session.json";

/// The application-wide context: one backend client, one durable store,
/// one selection session. Owned by the top-level application and passed
/// into the views that need it.
pub struct AppContext {
    pub config: ApiConfig,
    pub session: SelectionSession<ApiClient, FileStore>,
}

impl AppContext {
    /// Wire the full stack from an already-loaded configuration.
    ///
    /// Restores whatever commitment the snapshot file still holds, so a
    /// restart resumes where the previous session left off.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = ApiClient::new(&config)?;

        let snapshot_path = env::var("CANTEEN_SNAPSHOT_PATH")
            .unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
        let store = FileStore::open(snapshot_path);

        let customer_id = env::var("CANTEEN_CUSTOMER_ID")
            .ok()
            .and_then(|value| value.parse().ok());

        let today = Local::now().date_naive();
        let session = SelectionSession::new(client, store, today, customer_id);

        Ok(Self { config, session })
    }

    /// Load configuration from environment variables and wire the stack.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }
}
