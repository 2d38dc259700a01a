use serde::{Deserialize, Serialize};

use super::timestamp::{Timestamp, Timestamped};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ApiToken {
    pub id: u64,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub description: Option<String>,
    /// Valor opaco del token, tal cual lo firma el backend
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Timestamped for ApiToken {
    fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewApiTokenRequest {
    pub description: String,
}
