use crate::models::{LoginRequest, LoginResponse};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::navigation::{redirect_to_login, Navigator};
use crate::state::AuthState;
use crate::utils::constants::{DASHBOARD_ROUTE, LOGIN_PATH};

/// Login con usuario y contraseña. Si va bien guarda el JWT y navega al
/// dashboard; si falla deja la sesión limpia y devuelve el error.
pub async fn perform_login(
    client: &ApiClient,
    auth: &AuthState,
    navigator: &dyn Navigator,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    let request_body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    log::info!("🔐 [AUTH] Login de {}", username);

    let response = client
        .post(LOGIN_PATH, None, &request_body)
        .await
        .and_then(|value| {
            serde_json::from_value::<LoginResponse>(value)
                .map_err(|e| ApiError::DataShape(format!("Parse error: {}", e)))
        });

    match response {
        Ok(login) => {
            auth.set(login.jwt);
            log::info!("✅ [AUTH] Sesión iniciada");
            navigator.push(DASHBOARD_ROUTE);
            Ok(())
        }
        Err(e) => {
            log::error!("❌ [AUTH] Error en login: {}", e);
            auth.clear();
            Err(e)
        }
    }
}

/// Logout - olvida el token y vuelve a login
pub fn logout(auth: &AuthState, navigator: &dyn Navigator) {
    log::info!("👋 [AUTH] Logout");
    auth.clear();
    redirect_to_login(navigator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{HttpMethod, MemoryNavigator};
    use crate::testing::Fixture;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn login_stores_jwt_and_opens_dashboard() {
        let fixture = Fixture::logged_out();
        fixture
            .backend
            .respond_json(200, json!({"jwt": "new-jwt", "refresh_token": "r"}));

        block_on(perform_login(
            &fixture.client(),
            &fixture.auth,
            &fixture.navigator,
            "john@example.com",
            "cat",
        ))
        .unwrap();

        assert_eq!(fixture.auth.get().as_deref(), Some("new-jwt"));
        assert_eq!(fixture.persisted_token().as_deref(), Some("new-jwt"));
        assert_eq!(fixture.navigator.history(), vec!["/", "/dashboard"]);

        let request = &fixture.backend.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://api.test/api/v1/login");
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(request.body.as_deref().unwrap()).unwrap(),
            json!({"username": "john@example.com", "password": "cat"})
        );
    }

    #[test]
    fn rejected_login_leaves_no_token() {
        let fixture = Fixture::logged_in();
        fixture
            .backend
            .respond_json(401, json!({"error": "unauthorized", "message": "Invalid credentials"}));

        let error = block_on(perform_login(
            &fixture.client(),
            &fixture.auth,
            &fixture.navigator,
            "john@example.com",
            "wrong",
        ))
        .unwrap_err();

        assert!(error.is_authorization());
        assert_eq!(fixture.auth.get(), None);
        assert_eq!(fixture.persisted_token(), None);
        assert_eq!(fixture.navigator.current_route(), "/dashboard");
    }

    #[test]
    fn login_without_jwt_is_a_data_shape_error() {
        let fixture = Fixture::logged_out();
        fixture.backend.respond_json(200, json!({"token": "x"}));

        let error = block_on(perform_login(
            &fixture.client(),
            &fixture.auth,
            &fixture.navigator,
            "a",
            "b",
        ))
        .unwrap_err();

        assert_eq!(error.kind(), crate::services::ErrorKind::DataShape);
        assert!(!fixture.auth.is_authenticated());
    }

    #[test]
    fn logout_clears_and_replaces_route() {
        let fixture = Fixture::logged_in();
        let navigator = MemoryNavigator::new("/dashboard");
        navigator.push("/alerts");

        logout(&fixture.auth, &navigator);

        assert_eq!(fixture.auth.get(), None);
        assert_eq!(fixture.persisted_token(), None);
        assert_eq!(navigator.history(), vec!["/dashboard", "/"]);
    }
}
