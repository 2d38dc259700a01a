use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadatos de paginación que acompañan a cada colección en el sobre JSON
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct PageInfo {
    pub count: Option<u64>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageInfo {
    /// Lee `count`/`prev`/`next` del sobre; los campos ausentes o nulos quedan en None
    pub fn from_envelope(envelope: &Value) -> Self {
        let text = |key: &str| envelope.get(key).and_then(Value::as_str).map(String::from);
        Self {
            count: envelope.get("count").and_then(Value::as_u64),
            prev: text("prev"),
            next: text("next"),
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_pagination_fields() {
        let page = PageInfo::from_envelope(&json!({
            "alerts": [],
            "prev": null,
            "next": "/api/v1/alerts/?page=2",
            "count": 42
        }));
        assert_eq!(page.count, Some(42));
        assert_eq!(page.prev, None);
        assert!(page.has_next());
    }
}
