use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use canteen_core::models::reservation::Reservation;
use canteen_core::models::table::Table;
use canteen_store::SnapshotStore;

/// Storage key for the session's active table.
pub const SELECTED_TABLE_KEY: &str = "canteen.selected_table";
/// Storage key for the committed reservation (pending or persisted).
pub const SELECTED_RESERVATION_KEY: &str = "canteen.selected_reservation";

/// What a mount can recover from durable storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirroredSelection {
    pub table: Option<Table>,
    pub reservation: Option<Reservation>,
}

/// Typed snapshot of the committed selection over any [`SnapshotStore`].
///
/// Writes are last-write-wins with no cross-tab coordination; a second
/// tab sees this tab's snapshot at its own next mount.
pub struct SelectionMirror<S: SnapshotStore> {
    store: S,
}

impl<S: SnapshotStore> SelectionMirror<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read back the mirrored selection. Never fails: unreadable or
    /// corrupt entries are discarded and reported as absent.
    pub fn load(&mut self) -> MirroredSelection {
        MirroredSelection {
            table: self.load_entry(SELECTED_TABLE_KEY),
            reservation: self.load_entry(SELECTED_RESERVATION_KEY),
        }
    }

    fn load_entry<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "could not read snapshot entry");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "discarding corrupt snapshot entry");
                if let Err(err) = self.store.remove(key) {
                    warn!(key, error = %err, "could not remove corrupt snapshot entry");
                }
                None
            }
        }
    }

    pub fn save_table(&mut self, table: Option<&Table>) -> eyre::Result<()> {
        self.save_entry(SELECTED_TABLE_KEY, table)
    }

    pub fn save_reservation(&mut self, reservation: Option<&Reservation>) -> eyre::Result<()> {
        self.save_entry(SELECTED_RESERVATION_KEY, reservation)
    }

    fn save_entry<T: Serialize>(&mut self, key: &str, value: Option<&T>) -> eyre::Result<()> {
        match value {
            Some(value) => self.store.set(key, &serde_json::to_string(value)?),
            None => self.store.remove(key),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
