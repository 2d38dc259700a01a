// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Construye la petición, adjunta el bearer token y clasifica la respuesta.
// El transporte real (gloo-net en el navegador) va detrás de HttpBackend.
// ============================================================================

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transporte HTTP. Solo devuelve error cuando no hubo respuesta.
#[async_trait(?Send)]
pub trait HttpBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(target_arch = "wasm32")]
pub use gloo::GlooBackend;

#[cfg(target_arch = "wasm32")]
mod gloo {
    use async_trait::async_trait;
    use gloo_net::http::Request;

    use super::{HttpBackend, HttpMethod, HttpRequest, HttpResponse};
    use crate::services::error::ApiError;

    /// fetch() del navegador vía gloo-net
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooBackend;

    #[async_trait(?Send)]
    impl HttpBackend for GlooBackend {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = match request.method {
                HttpMethod::Get => Request::get(&request.url),
                HttpMethod::Post => Request::post(&request.url),
                HttpMethod::Put => Request::put(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = match request.body {
                Some(body) => builder
                    .body(body)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    backend: Rc<dyn HttpBackend>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, backend: Rc<dyn HttpBackend>) -> Self {
        Self {
            base_url: base_url.into(),
            backend,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Get, path, token, None).await
    }

    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.dispatch(HttpMethod::Post, path, token, Some(body)).await
    }

    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.dispatch(HttpMethod::Put, path, token, Some(body)).await
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, token, body);
        log::debug!("🌐 [API] {:?} {}", request.method, request.url);

        let response = self.backend.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_status(response.status, &response.body));
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DataShape(format!("Parse error: {}", e)))
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            // El backend histórico espera esta grafía
            ("Accepts".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use futures::executor::block_on;
    use serde_json::json;

    fn client(backend: &Rc<MockBackend>) -> ApiClient {
        ApiClient::new("http://api.test/", backend.clone())
    }

    #[test]
    fn attaches_bearer_when_token_present() {
        let backend = Rc::new(MockBackend::default());
        backend.respond_json(200, json!({"api-tokens": []}));

        let value = block_on(client(&backend).get("/api/v1/api-tokens/", Some("abc"))).unwrap();
        assert_eq!(value, json!({"api-tokens": []}));

        let request = &backend.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://api.test/api/v1/api-tokens/");
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("Accepts"), Some("application/json"));
        assert_eq!(request.body, None);
    }

    #[test]
    fn omits_authorization_without_token() {
        let backend = Rc::new(MockBackend::default());
        backend.respond_json(200, json!({}));
        backend.respond_json(200, json!({}));

        block_on(client(&backend).get("/api/v1/metrics/", None)).unwrap();
        block_on(client(&backend).get("/api/v1/metrics/", Some(""))).unwrap();

        for request in backend.requests() {
            assert_eq!(request.header("Authorization"), None);
        }
    }

    #[test]
    fn classifies_failures() {
        let backend = Rc::new(MockBackend::default());
        backend.respond_json(401, json!({"error": "unauthorized"}));
        backend.respond_json(500, json!({"message": "boom"}));
        backend.respond(Err(ApiError::Transport("offline".into())));
        backend.respond_text(200, "<html>");

        let client = client(&backend);
        let results: Vec<_> = (0..4)
            .map(|_| block_on(client.get("/x", Some("t"))).unwrap_err())
            .collect();

        assert_eq!(results[0], ApiError::Unauthorized { status: 401 });
        assert_eq!(
            results[1],
            ApiError::Http {
                status: 500,
                message: "boom".into()
            }
        );
        assert_eq!(results[2], ApiError::Transport("offline".into()));
        assert!(matches!(results[3], ApiError::DataShape(_)));
    }

    #[test]
    fn post_sends_json_body() {
        let backend = Rc::new(MockBackend::default());
        backend.respond_text(201, "");

        let value = block_on(client(&backend).post(
            "/api/v1/api-tokens/",
            Some("abc"),
            &json!({"description": "ci"}),
        ))
        .unwrap();
        assert_eq!(value, Value::Null);

        let request = &backend.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"description":"ci"}"#));
    }
}
