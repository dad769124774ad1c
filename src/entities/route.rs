use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted route summary, as returned by the store's list operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedRoute {
    pub id: Uuid,
    pub summary: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedRoute {
    pub fn new(summary: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            summary,
            saved_at: Utc::now(),
        }
    }
}
