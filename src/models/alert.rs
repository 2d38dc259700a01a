use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum AlertPriority {
    Info,
    Warning,
    Danger,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Alert {
    pub id: u64,
    pub content: String,
    pub acknowledged: bool,
    #[serde(default)]
    pub priority: Option<AlertPriority>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
