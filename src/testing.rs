// Dobles de prueba compartidos por los tests de cada módulo

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::config::AppConfig;
use crate::services::navigation::{MemoryNavigator, Navigator};
use crate::services::{ApiClient, ApiError, HttpBackend, HttpRequest, HttpResponse};
use crate::state::{AppState, AuthState, StoreContext};
use crate::utils::storage::{KeyValueStorage, MemoryStorage};

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Now(Reply),
    Later(oneshot::Receiver<Reply>),
}

/// Backend con respuestas en cola, consumidas en orden de petición
#[derive(Default)]
pub struct MockBackend {
    replies: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockBackend {
    pub fn respond(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(Scripted::Now(reply));
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond(Ok(json_response(status, body)));
    }

    pub fn respond_text(&self, status: u16, body: &str) {
        self.respond(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    /// La petición queda pendiente hasta que el test envía la respuesta
    pub fn respond_later(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Later(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpBackend for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let scripted = self.replies.borrow_mut().pop_front();
        match scripted {
            Some(Scripted::Now(reply)) => reply,
            Some(Scripted::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into()))),
            None => Err(ApiError::Transport("no scripted reply".into())),
        }
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

pub struct Fixture {
    pub backend: Rc<MockBackend>,
    pub storage: MemoryStorage,
    pub navigator: MemoryNavigator,
    pub auth: AuthState,
    pub config: AppConfig,
}

impl Fixture {
    /// Sesión abierta con el token "secret" en /dashboard
    pub fn logged_in() -> Self {
        let fixture = Self::logged_out();
        fixture.navigator.replace("/dashboard");
        fixture.auth.set("secret");
        fixture
    }

    pub fn logged_out() -> Self {
        let storage = MemoryStorage::new();
        Self {
            backend: Rc::new(MockBackend::default()),
            auth: AuthState::new(Rc::new(storage.clone())),
            storage,
            navigator: MemoryNavigator::default(),
            config: AppConfig {
                base_url: "http://api.test".to_string(),
                ..AppConfig::default()
            },
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.base_url.clone(), self.backend.clone())
    }

    pub fn context(&self) -> StoreContext {
        StoreContext {
            client: self.client(),
            auth: self.auth.clone(),
            navigator: Rc::new(self.navigator.clone()),
        }
    }

    /// AppState sobre el mismo backend, storage y navegador. Su AuthState es
    /// otra instancia: ve el token persistido solo tras `restore()`.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.config.clone(),
            self.backend.clone(),
            Rc::new(self.storage.clone()),
            Rc::new(self.navigator.clone()),
        )
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get_item("token").ok().flatten()
    }
}
