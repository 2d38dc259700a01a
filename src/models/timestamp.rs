use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Marca temporal tal como la envía el backend: epoch numérico o texto
/// ordenable lexicográficamente (ISO-8601).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(f64),
    Text(String),
}

impl Timestamp {
    /// Orden total: números entre sí por valor, textos entre sí
    /// lexicográficamente, y cualquier número antes que cualquier texto.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Timestamp::Epoch(a), Timestamp::Epoch(b)) => a.total_cmp(b),
            (Timestamp::Text(a), Timestamp::Text(b)) => a.cmp(b),
            (Timestamp::Epoch(_), Timestamp::Text(_)) => Ordering::Less,
            (Timestamp::Text(_), Timestamp::Epoch(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for Timestamp {
    fn from(value: f64) -> Self {
        Timestamp::Epoch(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp::Text(value.to_string())
    }
}

pub trait Timestamped {
    fn timestamp(&self) -> &Timestamp;
}

/// Ordena de más reciente a más antiguo. Estable: los empates conservan el
/// orden original.
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by(|a, b| b.timestamp().compare(a.timestamp()));
}
