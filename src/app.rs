// ============================================================================
// APP - Raíz de la aplicación en el navegador
// ============================================================================
// Crea el AppState con los adaptadores del navegador y expone a la vista
// las acciones (fetch, login, logout) y lecturas de estado vía wasm_bindgen.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::services::{BrowserNavigator, GlooBackend};
use crate::state::{AppState, CollectionStore, Domain};
use crate::utils::storage::BrowserStorage;

// El estado vive en la raíz; las funciones exportadas lo reciben de aquí
thread_local! {
    static APP: RefCell<Option<AppState>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🍇 Vineyard dashboard - cliente Rust");

    let state = AppState::new(
        CONFIG.clone(),
        Rc::new(GlooBackend),
        Rc::new(BrowserStorage),
        Rc::new(BrowserNavigator),
    );
    if state.auth.restore() {
        log::info!("✅ [APP] Sesión restaurada");
    }

    APP.with(|app| *app.borrow_mut() = Some(state));
    Ok(())
}

fn with_state<R>(f: impl FnOnce(&AppState) -> R) -> Option<R> {
    APP.with(|app| match app.borrow().as_ref() {
        Some(state) => Some(f(state)),
        None => {
            log::warn!("⚠️ [APP] App no está inicializada");
            None
        }
    })
}

fn spawn_fetch<D: Domain>(select: impl FnOnce(&AppState) -> &CollectionStore<D>) {
    // fetch() marca loading antes de soltar el borrow de APP
    if let Some(cycle) = with_state(|state| select(state).fetch()) {
        spawn_local(cycle);
    }
}

fn state_json<D: Domain>(select: impl FnOnce(&AppState) -> &CollectionStore<D>) -> Option<String> {
    with_state(|state| to_json(&select(state).state())).flatten()
}

fn to_json<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            log::error!("❌ [APP] Error serializando estado: {}", e);
            None
        }
    }
}

#[wasm_bindgen]
pub fn fetch_api_tokens() {
    spawn_fetch(|s| &s.api_tokens);
}

#[wasm_bindgen]
pub fn fetch_vineyards() {
    spawn_fetch(|s| &s.vineyards);
}

#[wasm_bindgen]
pub fn fetch_metrics() {
    spawn_fetch(|s| &s.metrics);
}

#[wasm_bindgen]
pub fn fetch_alerts() {
    spawn_fetch(|s| &s.alerts);
}

/// Estado de una colección como JSON: `{items, loading, error, page}`
#[wasm_bindgen]
pub fn collection_state(name: &str) -> Option<String> {
    match name {
        "api-tokens" => state_json(|s| &s.api_tokens),
        "vineyards" => state_json(|s| &s.vineyards),
        "metrics" => state_json(|s| &s.metrics),
        "alerts" => state_json(|s| &s.alerts),
        _ => {
            log::warn!("⚠️ [APP] Colección desconocida: {}", name);
            None
        }
    }
}

/// Llama a `callback` tras cada commit de la colección
#[wasm_bindgen]
pub fn on_collection_change(name: &str, callback: js_sys::Function) {
    let notify = move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("❌ [APP] Error en callback de la vista: {:?}", e);
        }
    };
    let subscribed = with_state(|s| match name {
        "api-tokens" => s.api_tokens.subscribe(notify),
        "vineyards" => s.vineyards.subscribe(notify),
        "metrics" => s.metrics.subscribe(notify),
        "alerts" => s.alerts.subscribe(notify),
        _ => log::warn!("⚠️ [APP] Colección desconocida: {}", name),
    });
    if subscribed.is_none() {
        log::warn!("⚠️ [APP] Suscripción a {} ignorada", name);
    }
}

#[wasm_bindgen]
pub fn create_api_token(description: String) {
    if let Some(state) = with_state(AppState::clone) {
        spawn_local(async move {
            if let Err(e) = state.api_tokens.create(&description).await {
                log::error!("❌ [APP] No se pudo crear el token: {}", e);
            }
        });
    }
}

#[wasm_bindgen]
pub fn toggle_alert_acknowledged(id: u32) {
    if let Some(state) = with_state(AppState::clone) {
        spawn_local(async move {
            if let Err(e) = state.alerts.toggle_acknowledged(u64::from(id)).await {
                log::error!("❌ [APP] No se pudo actualizar la alerta {}: {}", id, e);
            }
        });
    }
}

#[wasm_bindgen]
pub fn login(username: String, password: String) {
    if let Some(state) = with_state(AppState::clone) {
        spawn_local(async move {
            if let Err(e) = state.login(&username, &password).await {
                log::error!("❌ [APP] Error de login: {}", e);
            }
        });
    }
}

#[wasm_bindgen]
pub fn logout() {
    with_state(AppState::logout);
}

#[wasm_bindgen]
pub fn is_authenticated() -> bool {
    with_state(|s| s.auth.is_authenticated()).unwrap_or(false)
}

/// Clave del proveedor de mapas para el widget de la vista
#[wasm_bindgen]
pub fn maps_api_key() -> String {
    CONFIG.maps_api_key().to_string()
}
