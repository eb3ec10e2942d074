//! # Session Persistence Port
//!
//! Pluggable key-value storage for keeping a cart alive across page
//! loads within one buyer session.
//!
//! ## Persistence Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Session Persistence Flow                              │
//! │                                                                         │
//! │  CartStore                SessionStorage (port)       Backend           │
//! │  ─────────                ─────────────────────       ───────           │
//! │                                                                         │
//! │  persist_to() ──────────► save("tiffin.cart", json) ► browser storage,  │
//! │                                                       a file, a test    │
//! │  restore_from() ────────► load("tiffin.cart")       ► HashMap, ...      │
//! │                               │                                         │
//! │                               ├── absent  → store untouched             │
//! │                               ├── valid   → cart replaced, watchers     │
//! │                               │             notified                    │
//! │                               └── corrupt → empty cart (a torn          │
//! │                                             snapshot must never         │
//! │                                             produce a bad cart)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Durability across process restarts is explicitly NOT promised here.
//! The port exists so presentation code can plug in whatever qualifies
//! as "this session" for it; `MemoryStorage` is the in-crate default.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::SessionResult;

/// Well-known key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "tiffin.cart";

// =============================================================================
// Storage Port
// =============================================================================

/// String key-value storage for session state.
///
/// ## Contract
/// - `save` overwrites
/// - `load` returns `None` for an absent key, never an error
/// - `remove` on an absent key is a no-op
///
/// Object-safe and `Send + Sync` so stores can hold `&dyn SessionStorage`
/// across threads. Implementations that sit on async storage adapt
/// outside this crate.
pub trait SessionStorage: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Fetches the value under `key`.
    fn load(&self, key: &str) -> SessionResult<Option<String>>;

    /// Deletes the value under `key`.
    fn remove(&self, key: &str) -> SessionResult<()>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// In-memory `SessionStorage` backed by a `HashMap`.
///
/// The default backend for tests and for embedders that keep the whole
/// session in one process anyway.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn save(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> SessionResult<Option<String>> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let storage = MemoryStorage::new();

        storage.save("k", "v1").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v1"));

        // Save overwrites.
        storage.save("k", "v2").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_load_absent_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("missing").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();
        storage.save("k", "v").unwrap();

        storage.remove("k").unwrap();
        assert_eq!(storage.load("k").unwrap(), None);

        // Removing again is a no-op.
        storage.remove("k").unwrap();
    }
}
