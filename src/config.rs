use crate::state::FetchOrdering;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub maps_api_key: String,
    pub enable_logging: bool,
    pub fetch_ordering: FetchOrdering,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            maps_api_key: String::new(),
            enable_logging: true,
            fetch_ordering: FetchOrdering::LastWriteWins,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: option_env!("BASE_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.base_url),
            maps_api_key: option_env!("GMAPS_API_TOKEN")
                .unwrap_or("")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            fetch_ordering: option_env!("FETCH_ORDERING")
                .and_then(parse_fetch_ordering)
                .unwrap_or(defaults.fetch_ordering),
        }
    }

    /// Nivel máximo de log según ENABLE_LOGGING
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }

    /// Clave del proveedor de mapas (vacía si no se configuró)
    pub fn maps_api_key(&self) -> &str {
        &self.maps_api_key
    }
}

/// Acepta `last-write-wins` o `latest-only` (sin distinguir mayúsculas)
pub fn parse_fetch_ordering(value: &str) -> Option<FetchOrdering> {
    match value.trim().to_ascii_lowercase().as_str() {
        "last-write-wins" | "last_write_wins" => Some(FetchOrdering::LastWriteWins),
        "latest-only" | "latest_only" => Some(FetchOrdering::LatestOnly),
        _ => None,
    }
}

// Configuración global estática, solo para la raíz del navegador
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_orderings() {
        assert_eq!(parse_fetch_ordering("latest-only"), Some(FetchOrdering::LatestOnly));
        assert_eq!(parse_fetch_ordering(" Last_Write_Wins "), Some(FetchOrdering::LastWriteWins));
        assert_eq!(parse_fetch_ordering("newest"), None);
    }

    #[test]
    fn log_level_follows_flag() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
