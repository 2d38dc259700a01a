// ============================================================================
// DOMINIOS - Las cuatro colecciones del dashboard
// ============================================================================

use serde_json::{json, Value};

use super::collection::{CollectionStore, Domain};
use crate::models::{sort_newest_first, Alert, ApiToken, Metric, NewApiTokenRequest, Vineyard};
use crate::services::ApiError;

pub struct ApiTokens;

impl Domain for ApiTokens {
    type Item = ApiToken;
    const NAME: &'static str = "API_TOKENS";
    const PATH: &'static str = "/api/v1/api-tokens/";
    const ENVELOPE_KEY: &'static str = "api-tokens";

    fn normalize(items: &mut Vec<ApiToken>) {
        sort_newest_first(items);
    }
}

pub struct Vineyards;

impl Domain for Vineyards {
    type Item = Vineyard;
    const NAME: &'static str = "VINEYARDS";
    const PATH: &'static str = "/api/v1/vineyards/";
    const ENVELOPE_KEY: &'static str = "vineyards";
}

pub struct Metrics;

impl Domain for Metrics {
    type Item = Metric;
    const NAME: &'static str = "METRICS";
    const PATH: &'static str = "/api/v1/metrics/";
    const ENVELOPE_KEY: &'static str = "metrics";

    fn normalize(items: &mut Vec<Metric>) {
        sort_newest_first(items);
    }
}

pub struct Alerts;

impl Domain for Alerts {
    type Item = Alert;
    const NAME: &'static str = "ALERTS";
    const PATH: &'static str = "/api/v1/alerts/";
    const ENVELOPE_KEY: &'static str = "alerts";
}

pub type ApiTokensStore = CollectionStore<ApiTokens>;
pub type VineyardsStore = CollectionStore<Vineyards>;
pub type MetricsStore = CollectionStore<Metrics>;
pub type AlertsStore = CollectionStore<Alerts>;

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::DataShape(e.to_string()))
}

impl CollectionStore<ApiTokens> {
    /// Crea un token nuevo y recarga la lista
    pub async fn create(&self, description: &str) -> Result<ApiToken, ApiError> {
        let ctx = self.context();
        let token = ctx.auth.get();
        let request = NewApiTokenRequest {
            description: description.to_string(),
        };

        let created = ctx
            .client
            .post(ApiTokens::PATH, token.as_deref(), &request)
            .await
            .and_then(decode::<ApiToken>);

        match created {
            Ok(created) => {
                log::info!("🔑 [API_TOKENS] Token {} creado", created.id);
                self.fetch().await;
                Ok(created)
            }
            Err(error) => {
                self.fail(error.clone());
                Err(error)
            }
        }
    }
}

impl CollectionStore<Alerts> {
    /// Alterna `acknowledged` en el backend y sustituye la alerta en sitio
    pub async fn toggle_acknowledged(&self, id: u64) -> Result<Alert, ApiError> {
        let ctx = self.context();
        let token = ctx.auth.get();
        let path = format!("{}{}", Alerts::PATH, id);

        let updated = ctx
            .client
            .put(&path, token.as_deref(), &json!({}))
            .await
            .and_then(decode::<Alert>);

        match updated {
            Ok(alert) => {
                log::info!(
                    "🔔 [ALERTS] Alerta {} acknowledged={}",
                    alert.id,
                    alert.acknowledged
                );
                let replacement = alert.clone();
                self.update_items(move |items| {
                    if let Some(slot) = items.iter_mut().find(|a| a.id == replacement.id) {
                        *slot = replacement;
                    }
                });
                Ok(alert)
            }
            Err(error) => {
                self.fail(error.clone());
                Err(error)
            }
        }
    }
}
