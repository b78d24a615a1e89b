use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub number: i32,
    pub location: Option<String>,
    pub capacity: u32,
    pub status: TableStatus,
}

impl Table {
    /// Only `available` tables may be picked; `occupied` and `reserved`
    /// reflect server-side truth at fetch time.
    pub fn is_selectable(&self) -> bool {
        self.status == TableStatus::Available
    }
}
