// ============================================================================
// AUTH STATE - Bearer token de la sesión
// ============================================================================
// Copia en memoria + copia persistida en localStorage ("token").
// La copia en memoria manda; los fallos de storage solo se loguean.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::constants::STORAGE_KEY_TOKEN;
use crate::utils::storage::KeyValueStorage;

#[derive(Clone)]
pub struct AuthState {
    token: Rc<RefCell<Option<String>>>,
    storage: Rc<dyn KeyValueStorage>,
}

impl AuthState {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            token: Rc::new(RefCell::new(None)),
            storage,
        }
    }

    /// Recupera el token persistido al arrancar. Devuelve si había uno.
    pub fn restore(&self) -> bool {
        match self.storage.get_item(STORAGE_KEY_TOKEN) {
            Ok(Some(token)) if !token.is_empty() => {
                log::info!("✅ [AUTH] Token restaurado desde storage");
                *self.token.borrow_mut() = Some(token);
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("⚠️ [AUTH] No se pudo leer el token: {}", e);
                false
            }
        }
    }

    /// Obtener token
    pub fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Establecer token (memoria + storage)
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.storage.set_item(STORAGE_KEY_TOKEN, &token) {
            log::error!("❌ [AUTH] Error persistiendo token: {}", e);
        }
        *self.token.borrow_mut() = Some(token);
    }

    /// Olvidar el token, también la copia persistida
    pub fn clear(&self) {
        *self.token.borrow_mut() = None;
        if let Err(e) = self.storage.remove_item(STORAGE_KEY_TOKEN) {
            log::error!("❌ [AUTH] Error borrando token persistido: {}", e);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }
}
