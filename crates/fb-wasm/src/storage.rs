//! `localStorage`-backed session cache.
//!
//! Best-effort write-through under the fixed session key. Storage being
//! unavailable (private browsing, quota) downgrades to warnings — the
//! editor keeps working in memory.

use fb_core::model::FormField;
use fb_core::session::{SESSION_KEY, SessionStore};

pub struct LocalStorageSession;

impl LocalStorageSession {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl Default for LocalStorageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageSession {
    fn load(&self) -> Option<Vec<FormField>> {
        let raw = Self::storage()?.get_item(SESSION_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(fields) => Some(fields),
            Err(err) => {
                log::warn!("discarding unreadable session cache: {err}");
                None
            }
        }
    }

    fn persist(&mut self, fields: &[FormField]) {
        let json = match serde_json::to_string(fields) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize session: {err}");
                return;
            }
        };
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(SESSION_KEY, &json).is_err() {
                    log::warn!("failed to persist session to localStorage");
                }
            }
            None => log::warn!("localStorage unavailable; session not persisted"),
        }
    }
}
