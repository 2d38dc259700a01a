use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error escribiendo en localStorage: {0}")]
    Write(String),
}

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStorage, StorageError};
    use web_sys::{window, Storage};

    /// localStorage del navegador
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStorage;

    fn local_storage() -> Result<Storage, StorageError> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    impl KeyValueStorage for BrowserStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            local_storage()?
                .get_item(key)
                .map_err(|_| StorageError::Unavailable)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{:?}", e)))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            local_storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Write(format!("{:?}", e)))
        }
    }
}

/// Almacenamiento en memoria. Los clones comparten el mismo mapa.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("token", "abc").unwrap();
        assert_eq!(other.get_item("token").unwrap().as_deref(), Some("abc"));

        other.remove_item("token").unwrap();
        assert!(!storage.contains_key("token"));
        // borrar una clave ausente no es error
        assert!(storage.remove_item("token").is_ok());
    }
}
