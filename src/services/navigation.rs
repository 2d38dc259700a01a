use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::constants::ROOT_ROUTE;

/// Historial de navegación de la SPA
pub trait Navigator {
    /// Sustituye la entrada actual (no deja rastro para el botón atrás)
    fn replace(&self, route: &str);
    /// Añade una entrada nueva
    fn push(&self, route: &str);
    fn current_route(&self) -> String;
}

/// Vuelve a la vista de login sin apilar historial
pub fn redirect_to_login(navigator: &dyn Navigator) {
    log::info!("↩️ [NAV] Redirigiendo a login");
    navigator.replace(ROOT_ROUTE);
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Navigator;
    use wasm_bindgen::JsValue;
    use web_sys::{window, Event};

    /// History API del navegador. Tras cada cambio emite `popstate` para que
    /// el router de la vista vuelva a renderizar.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserNavigator;

    impl BrowserNavigator {
        fn notify_router() {
            if let (Some(win), Ok(event)) = (window(), Event::new("popstate")) {
                let _ = win.dispatch_event(&event);
            }
        }
    }

    impl Navigator for BrowserNavigator {
        fn replace(&self, route: &str) {
            let Some(history) = window().and_then(|w| w.history().ok()) else {
                log::warn!("⚠️ [NAV] History API no disponible");
                return;
            };
            if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(route)) {
                log::error!("❌ [NAV] replaceState falló: {:?}", e);
                return;
            }
            Self::notify_router();
        }

        fn push(&self, route: &str) {
            let Some(history) = window().and_then(|w| w.history().ok()) else {
                log::warn!("⚠️ [NAV] History API no disponible");
                return;
            };
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(route)) {
                log::error!("❌ [NAV] pushState falló: {:?}", e);
                return;
            }
            Self::notify_router();
        }

        fn current_route(&self) -> String {
            window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string())
        }
    }
}

/// Historial en memoria. Los clones comparten la misma pila.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    history: Rc<RefCell<Vec<String>>>,
}

impl MemoryNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: Rc::new(RefCell::new(vec![initial.to_string()])),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(ROOT_ROUTE)
    }
}

impl Navigator for MemoryNavigator {
    fn replace(&self, route: &str) {
        let mut history = self.history.borrow_mut();
        match history.last_mut() {
            Some(last) => *last = route.to_string(),
            None => history.push(route.to_string()),
        }
    }

    fn push(&self, route: &str) {
        self.history.borrow_mut().push(route.to_string());
    }

    fn current_route(&self) -> String {
        self.history
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| ROOT_ROUTE.to_string())
    }
}
