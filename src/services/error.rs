use serde_json::Value;
use thiserror::Error;

/// Errores de una llamada al backend.
///
/// Los stores los tratan todos igual (flag `error` + logout), pero la
/// distinción se conserva para el log y para diferenciarlos más adelante.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// La petición no obtuvo respuesta (DNS, conexión, CORS...)
    #[error("Network error: {0}")]
    Transport(String),

    /// El backend rechazó la credencial (401/403)
    #[error("Unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Cualquier otro estado no 2xx
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Respuesta sin el campo esperado o JSON inválido
    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Authorization,
    Http,
    DataShape,
    Serialization,
}

impl ApiError {
    /// Clasifica una respuesta no 2xx
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status },
            _ => ApiError::Http {
                status,
                message: error_message(body),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Unauthorized { .. } => ErrorKind::Authorization,
            ApiError::Http { .. } => ErrorKind::Http,
            ApiError::DataShape(_) => ErrorKind::DataShape,
            ApiError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status } | ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Flask responde `{"error": "...", "message": "..."}`; si no, el texto plano
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
