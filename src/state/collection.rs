// ============================================================================
// COLLECTION STORE - Colección remota cacheada (una instancia por dominio)
// ============================================================================
// fetch() marca loading de forma síncrona y devuelve el ciclo como future.
// Cada ciclo termina con un único commit: éxito (items normalizados) o
// fallo (lista vacía + error, logout y vuelta a login).
// ============================================================================

use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::auth_state::AuthState;
use super::reactivity::ReactiveState;
use crate::models::PageInfo;
use crate::services::navigation::{redirect_to_login, Navigator};
use crate::services::{ApiClient, ApiError, ErrorKind};

/// Describe una colección del backend
pub trait Domain: 'static {
    type Item: DeserializeOwned + Serialize + Clone + 'static;

    /// Etiqueta para el log
    const NAME: &'static str;
    const PATH: &'static str;
    /// Campo del sobre JSON que contiene la lista
    const ENVELOPE_KEY: &'static str;

    fn normalize(_items: &mut Vec<Self::Item>) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: bool,
    pub page: PageInfo,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: false,
            page: PageInfo::default(),
        }
    }
}

/// Qué hacer cuando dos fetch del mismo store se solapan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOrdering {
    /// El último en completar sobrescribe, aunque sea el más antiguo
    #[default]
    LastWriteWins,
    /// Solo el ciclo más reciente puede hacer commit
    LatestOnly,
}

/// Dependencias compartidas por todos los stores
#[derive(Clone)]
pub struct StoreContext {
    pub client: ApiClient,
    pub auth: AuthState,
    pub navigator: Rc<dyn Navigator>,
}

pub struct CollectionStore<D: Domain> {
    state: ReactiveState<CollectionState<D::Item>>,
    generation: Rc<Cell<u64>>,
    last_error: Rc<Cell<Option<ErrorKind>>>,
    ordering: FetchOrdering,
    ctx: StoreContext,
    _domain: PhantomData<D>,
}

impl<D: Domain> Clone for CollectionStore<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            generation: self.generation.clone(),
            last_error: self.last_error.clone(),
            ordering: self.ordering,
            ctx: self.ctx.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> CollectionStore<D> {
    pub fn new(ctx: StoreContext, ordering: FetchOrdering) -> Self {
        Self {
            state: ReactiveState::new(CollectionState::default()),
            generation: Rc::new(Cell::new(0)),
            last_error: Rc::new(Cell::new(None)),
            ordering,
            ctx,
            _domain: PhantomData,
        }
    }

    /// Inicia un ciclo de fetch. `loading` ya es true cuando esta función
    /// retorna; el future devuelto hace la petición y el commit final.
    pub fn fetch(&self) -> LocalBoxFuture<'static, ()> {
        let generation = self.begin_cycle();
        let token = self.ctx.auth.get();
        let store = self.clone();

        async move {
            let result = store
                .ctx
                .client
                .get(D::PATH, token.as_deref())
                .await
                .and_then(extract::<D>);
            store.complete(generation, result);
        }
        .boxed_local()
    }

    pub fn state(&self) -> CollectionState<D::Item> {
        self.state.snapshot()
    }

    pub fn items(&self) -> Vec<D::Item> {
        self.state.with(|s| s.items.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn has_error(&self) -> bool {
        self.state.with(|s| s.error)
    }

    /// Tipo del último fallo, solo para diagnóstico
    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.last_error.get()
    }

    pub fn ordering(&self) -> FetchOrdering {
        self.ordering
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    pub(crate) fn context(&self) -> &StoreContext {
        &self.ctx
    }

    /// Modificar la lista en sitio (acciones que no pasan por fetch)
    pub(crate) fn update_items(&self, updater: impl FnOnce(&mut Vec<D::Item>)) {
        self.state.update(|s| updater(&mut s.items));
    }

    fn begin_cycle(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.state.update(|s| s.loading = true);
        log::debug!("⏳ [{}] fetch #{} iniciado", D::NAME, generation);
        generation
    }

    fn complete(&self, generation: u64, result: Result<(Vec<D::Item>, PageInfo), ApiError>) {
        if self.ordering == FetchOrdering::LatestOnly && generation != self.generation.get() {
            log::debug!(
                "⏭️ [{}] fetch #{} descartado (actual #{})",
                D::NAME,
                generation,
                self.generation.get()
            );
            return;
        }

        match result {
            Ok((items, page)) => {
                log::info!("✅ [{}] {} elementos", D::NAME, items.len());
                self.last_error.set(None);
                self.state.update(|s| {
                    s.items = items;
                    s.loading = false;
                    s.error = false;
                    s.page = page;
                });
            }
            Err(error) => self.fail(error),
        }
    }

    /// Commit de fallo: lista vacía + error, logout y vuelta a login
    pub(crate) fn fail(&self, error: ApiError) {
        log::error!(
            "❌ [{}] {:?} (status {:?}): {}",
            D::NAME,
            error.kind(),
            error.status(),
            error
        );
        self.last_error.set(Some(error.kind()));
        self.state.update(|s| {
            s.items = Vec::new();
            s.loading = false;
            s.error = true;
            s.page = PageInfo::default();
        });
        self.ctx.auth.clear();
        redirect_to_login(self.ctx.navigator.as_ref());
    }
}

/// Saca la lista del sobre `{ <ENVELOPE_KEY>: [...], prev, next, count }`
fn extract<D: Domain>(mut envelope: Value) -> Result<(Vec<D::Item>, PageInfo), ApiError> {
    let raw = envelope
        .get_mut(D::ENVELOPE_KEY)
        .map(Value::take)
        .ok_or_else(|| ApiError::DataShape(format!("missing `{}` in response", D::ENVELOPE_KEY)))?;

    let mut items: Vec<D::Item> = serde_json::from_value(raw)
        .map_err(|e| ApiError::DataShape(format!("`{}`: {}", D::ENVELOPE_KEY, e)))?;
    D::normalize(&mut items);

    Ok((items, PageInfo::from_envelope(&envelope)))
}
