use serde::{Deserialize, Serialize};

use super::timestamp::{Timestamp, Timestamped};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Metric {
    pub id: u64,
    pub timestamp: Timestamp,
    /// Valor decimal serializado como texto por el backend
    pub value: String,
    #[serde(default)]
    pub magnitude_url: Option<String>,
}

impl Timestamped for Metric {
    fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}
