//! Session persistence seam.
//!
//! The store write-through persists the full collection after every
//! mutation and reads it back once at construction. Persistence is
//! best-effort: failures are logged and swallowed, never surfaced.
//! There is no ambient global — the store receives its session handle
//! explicitly.

use crate::model::FormField;

/// Fixed key the collection is cached under.
pub const SESSION_KEY: &str = "form-builder-fields";

/// A process- or host-scoped key-value slot for the working collection.
pub trait SessionStore {
    /// Read the cached collection, if any. Called once at store init.
    fn load(&self) -> Option<Vec<FormField>>;

    /// Write the full collection. Errors are the implementation's to log.
    fn persist(&mut self, fields: &[FormField]);
}

/// In-memory session used by tests and native hosts. Holds the same JSON
/// payload a browser cache would.
#[derive(Debug, Default)]
pub struct MemorySession {
    cached: Option<String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, as if a previous session had persisted.
    pub fn seeded(fields: &[FormField]) -> Self {
        Self {
            cached: serde_json::to_string(fields).ok(),
        }
    }
}

impl SessionStore for MemorySession {
    fn load(&self) -> Option<Vec<FormField>> {
        let raw = self.cached.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(fields) => Some(fields),
            Err(err) => {
                log::warn!("discarding unreadable session cache: {err}");
                None
            }
        }
    }

    fn persist(&mut self, fields: &[FormField]) {
        match serde_json::to_string(fields) {
            Ok(json) => self.cached = Some(json),
            Err(err) => log::warn!("failed to persist session: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::descriptor_by_id;
    use crate::id::FieldId;
    use crate::model::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_slot_loads_nothing() {
        assert!(MemorySession::new().load().is_none());
    }

    #[test]
    fn persist_then_load_roundtrips() {
        let field = descriptor_by_id("checkbox").unwrap().instantiate(
            FieldId::intern("checkbox-s0"),
            "checkbox_s0".to_string(),
            Position::new(5.0, 6.0),
        );
        let mut session = MemorySession::new();
        session.persist(&[field.clone()]);
        assert_eq!(session.load(), Some(vec![field]));
    }

    #[test]
    fn corrupt_payload_loads_nothing() {
        let session = MemorySession {
            cached: Some("{not json".to_string()),
        };
        assert!(session.load().is_none());
    }
}
