// ============================================================================
// VINEYARD DASHBOARD - CLIENTE WASM (RUST PURO)
// ============================================================================
// - Models: Estructuras compartidas con el backend
// - Services: Comunicación HTTP, login/logout y navegación
// - State: Sesión + stores de colecciones con Rc<RefCell>
// - Utils: Constantes y almacenamiento persistente
// La vista (router, mapa, componentes) vive fuera de este crate y se
// comunica con él a través de las funciones exportadas en `app`.
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AppConfig;
pub use services::{ApiClient, ApiError, ErrorKind};
pub use state::{AppState, AuthState, CollectionState, CollectionStore, FetchOrdering};
