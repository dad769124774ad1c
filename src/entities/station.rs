use serde::{Deserialize, Serialize};

use crate::entities::Position;

/// One air-quality observation, as extracted from a monitoring-station feed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StationReading {
    pub name: String,
    pub position: Position,
    pub aqi: i64,
}

impl StationReading {
    pub fn new(name: String, position: Position, aqi: i64) -> Self {
        Self {
            name,
            position,
            aqi,
        }
    }
}
