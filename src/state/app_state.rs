// ============================================================================
// APP STATE - Contenedor de estado de la aplicación
// ============================================================================
// Lo crea la raíz de la app y se pasa por referencia; no hay globales.
// ============================================================================

use std::rc::Rc;

use super::auth_state::AuthState;
use super::collection::StoreContext;
use super::domains::{AlertsStore, ApiTokensStore, MetricsStore, VineyardsStore};
use crate::config::AppConfig;
use crate::services::{self, ApiClient, ApiError, HttpBackend, Navigator};
use crate::utils::storage::KeyValueStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth: AuthState,
    pub client: ApiClient,
    pub navigator: Rc<dyn Navigator>,

    pub api_tokens: ApiTokensStore,
    pub vineyards: VineyardsStore,
    pub metrics: MetricsStore,
    pub alerts: AlertsStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        backend: Rc<dyn HttpBackend>,
        storage: Rc<dyn KeyValueStorage>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let auth = AuthState::new(storage);
        let client = ApiClient::new(config.base_url.clone(), backend);
        let ctx = StoreContext {
            client: client.clone(),
            auth: auth.clone(),
            navigator: navigator.clone(),
        };
        let ordering = config.fetch_ordering;

        Self {
            api_tokens: ApiTokensStore::new(ctx.clone(), ordering),
            vineyards: VineyardsStore::new(ctx.clone(), ordering),
            metrics: MetricsStore::new(ctx.clone(), ordering),
            alerts: AlertsStore::new(ctx, ordering),
            config,
            auth,
            client,
            navigator,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        services::perform_login(
            &self.client,
            &self.auth,
            self.navigator.as_ref(),
            username,
            password,
        )
        .await
    }

    pub fn logout(&self) {
        services::logout(&self.auth, self.navigator.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FetchOrdering;
    use crate::testing::Fixture;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn stores_share_one_credential() {
        let fixture = Fixture::logged_out();
        fixture.backend.respond_json(200, json!({"jwt": "jwt-1"}));
        fixture.backend.respond_json(200, json!({"alerts": []}));
        fixture.backend.respond_json(401, json!({"error": "unauthorized"}));
        let state = fixture.app_state();

        block_on(state.login("john@example.com", "cat")).unwrap();
        block_on(state.alerts.fetch());
        assert_eq!(
            fixture.backend.requests()[1].header("Authorization"),
            Some("Bearer jwt-1")
        );

        // un fallo en cualquier store cierra la sesión de todos
        block_on(state.vineyards.fetch());
        assert!(state.vineyards.has_error());
        assert!(!state.alerts.has_error());
        assert!(!state.auth.is_authenticated());
        assert_eq!(fixture.persisted_token(), None);
        assert_eq!(state.navigator.current_route(), "/");
    }

    #[test]
    fn restores_persisted_session() {
        let fixture = Fixture::logged_in();
        fixture.backend.respond_json(200, json!({"metrics": []}));
        let state = fixture.app_state();

        assert!(state.auth.restore());
        block_on(state.metrics.fetch());
        assert_eq!(
            fixture.backend.requests()[0].header("Authorization"),
            Some("Bearer secret")
        );
    }

    #[test]
    fn config_drives_fetch_ordering() {
        let mut fixture = Fixture::logged_out();
        fixture.config.fetch_ordering = FetchOrdering::LatestOnly;
        let state = fixture.app_state();

        assert_eq!(state.api_tokens.ordering(), FetchOrdering::LatestOnly);
        assert_eq!(state.alerts.ordering(), FetchOrdering::LatestOnly);
    }

    #[test]
    fn logout_redirects() {
        let fixture = Fixture::logged_in();
        let state = fixture.app_state();
        state.auth.restore();

        state.logout();

        assert!(!state.auth.is_authenticated());
        assert_eq!(fixture.persisted_token(), None);
        assert_eq!(state.navigator.current_route(), "/");
    }
}
