//! The field store — single writer over the placed-field collection.
//!
//! Owns the fields, the selection, the snapshot history, and the session
//! cache handle. Every mutating operation write-through persists the full
//! collection; structural mutations additionally commit a history
//! snapshot. Mutations addressing an unknown id are silent no-ops.

use crate::history::{HISTORY_DEPTH, History};
use fb_core::catalog::ComponentDescriptor;
use fb_core::id::FieldId;
use fb_core::model::{FieldPatch, FormField, Position};
use fb_core::session::SessionStore;
use rand::Rng;

/// Host callback invoked by `save_form` with the current collection.
pub type SaveCallback = Box<dyn FnMut(&[FormField])>;

/// Offset applied to a duplicated field's position.
const DUPLICATE_OFFSET: f32 = 20.0;

pub struct FormStore {
    fields: Vec<FormField>,
    selected: Option<FieldId>,
    history: History,
    session: Box<dyn SessionStore>,
    on_save: Option<SaveCallback>,
    read_only: bool,
}

impl FormStore {
    /// Build a store over a session cache. Caller-supplied fields take
    /// precedence; an empty `initial` falls back to the cached session,
    /// read exactly once here.
    pub fn new(initial: Vec<FormField>, session: Box<dyn SessionStore>) -> Self {
        let fields = if initial.is_empty() {
            session.load().unwrap_or_default()
        } else {
            initial
        };
        let history = History::new(HISTORY_DEPTH, &fields);
        Self {
            fields,
            selected: None,
            history,
            session,
            on_save: None,
            read_only: false,
        }
    }

    pub fn set_on_save(&mut self, on_save: SaveCallback) {
        self.on_save = Some(on_save);
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn selected(&self) -> Option<FieldId> {
        self.selected
    }

    /// The live selected field, if the selection still exists.
    pub fn selected_field(&self) -> Option<&FormField> {
        self.selected.and_then(|id| self.field(id))
    }

    pub fn select(&mut self, id: Option<FieldId>) {
        self.selected = id;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History cursor, exposed for assertions on move semantics.
    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    // ─── Structural mutations (undoable) ─────────────────────────────────

    /// Instantiate a descriptor at `position`, append, and select it.
    /// Always succeeds.
    pub fn add_field(&mut self, descriptor: &ComponentDescriptor, position: Position) -> FieldId {
        let id = FieldId::with_prefix(descriptor.kind.tag());
        let key = generate_key(descriptor.kind.tag());
        let field = descriptor.instantiate(id, key, position);
        log::debug!("add {} at ({}, {})", id, position.x, position.y);

        self.fields.push(field);
        self.selected = Some(id);
        self.commit_and_persist();
        id
    }

    /// Remove the matching field; clears the selection if it was the
    /// target. Silent no-op on unknown id.
    pub fn delete_field(&mut self, id: FieldId) {
        if self.field(id).is_none() {
            return;
        }
        self.fields.retain(|f| f.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.commit_and_persist();
    }

    /// Clone the matching field at a (+20, +20) offset with a fresh id and
    /// binding key, append, and select the clone. No-op on unknown id.
    pub fn duplicate_field(&mut self, id: FieldId) {
        let Some(original) = self.field(id) else {
            return;
        };
        let mut clone = original.clone();
        clone.id = FieldId::with_prefix(clone.kind.tag());
        clone.key = generate_key(clone.kind.tag());
        clone.x += DUPLICATE_OFFSET;
        clone.y += DUPLICATE_OFFSET;

        self.selected = Some(clone.id);
        self.fields.push(clone);
        self.commit_and_persist();
    }

    /// Empty the collection and clear the selection.
    pub fn clear_form(&mut self) {
        self.fields.clear();
        self.selected = None;
        self.commit_and_persist();
    }

    // ─── Non-structural mutations (not undoable) ─────────────────────────

    /// Merge a patch into the matching field. Silent no-op on unknown id.
    /// Does not commit history.
    pub fn update_field(&mut self, id: FieldId, patch: &FieldPatch) {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
            return;
        };
        patch.apply_to(field);
        self.persist();
    }

    /// Reposition a field. Geometry-only; drag-reposition stays outside
    /// the undo history.
    pub fn move_field(&mut self, id: FieldId, position: Position) {
        self.update_field(id, &FieldPatch::position(position));
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Step back one committed state. No-op at the oldest retained state.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.fields = snapshot.to_vec();
            self.persist();
        }
    }

    /// Step forward one committed state. No-op at the newest.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.fields = snapshot.to_vec();
            self.persist();
        }
    }

    // ─── Host save ───────────────────────────────────────────────────────

    /// Invoke the save callback with the current collection. Pure
    /// passthrough; no internal state change.
    pub fn save_form(&mut self) {
        if let Some(on_save) = self.on_save.as_mut() {
            on_save(&self.fields);
        }
    }

    fn commit_and_persist(&mut self) {
        self.history.commit(&self.fields);
        self.persist();
    }

    fn persist(&mut self) {
        self.session.persist(&self.fields);
    }
}

/// Binding key: `{type}_{9 lowercase alphanumeric chars}`. Unique enough
/// in practice, not guaranteed by contract.
fn generate_key(prefix: &str) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{prefix}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::catalog::descriptor_by_id;
    use fb_core::session::MemorySession;
    use pretty_assertions::assert_eq;

    fn store() -> FormStore {
        FormStore::new(Vec::new(), Box::new(MemorySession::new()))
    }

    #[test]
    fn add_selects_the_new_field_and_applies_position() {
        let mut store = store();
        let id = store.add_field(
            descriptor_by_id("textfield").unwrap(),
            Position::new(30.0, 40.0),
        );
        assert_eq!(store.selected(), Some(id));
        let field = store.field(id).unwrap();
        assert_eq!((field.x, field.y), (30.0, 40.0));
        assert_eq!((field.width, field.height), (200.0, 40.0));
    }

    #[test]
    fn binding_keys_carry_the_type_prefix() {
        let mut store = store();
        let id = store.add_field(descriptor_by_id("select").unwrap(), Position::default());
        let key = &store.field(id).unwrap().key;
        assert!(key.starts_with("select_"), "unexpected key {key}");
        assert_eq!(key.len(), "select_".len() + 9);
    }

    #[test]
    fn delete_of_unknown_id_is_a_silent_no_op() {
        let mut store = store();
        store.add_field(descriptor_by_id("checkbox").unwrap(), Position::default());
        let depth = store.history_depth();
        store.delete_field(FieldId::intern("textfield-missing"));
        assert_eq!(store.fields().len(), 1);
        assert_eq!(store.history_depth(), depth);
    }

    #[test]
    fn deleting_selected_clears_selection_others_keep_it() {
        let mut store = store();
        let first = store.add_field(descriptor_by_id("textfield").unwrap(), Position::default());
        let second = store.add_field(descriptor_by_id("checkbox").unwrap(), Position::default());
        assert_eq!(store.selected(), Some(second));

        store.delete_field(first);
        assert_eq!(store.selected(), Some(second));

        store.delete_field(second);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn duplicate_offsets_and_rekeys() {
        let mut store = store();
        let id = store.add_field(
            descriptor_by_id("textfield").unwrap(),
            Position::new(100.0, 50.0),
        );
        store.duplicate_field(id);

        let clone_id = store.selected().unwrap();
        assert_ne!(clone_id, id);
        let original = store.field(id).unwrap();
        let clone = store.field(clone_id).unwrap();
        assert_eq!((clone.x, clone.y), (120.0, 70.0));
        assert_ne!(clone.key, original.key);
        assert_eq!(clone.label, original.label);
    }

    #[test]
    fn update_merges_without_committing_history() {
        let mut store = store();
        let id = store.add_field(descriptor_by_id("textfield").unwrap(), Position::default());
        let cursor = store.history_cursor();

        store.update_field(
            id,
            &FieldPatch {
                label: Some("Email".to_string()),
                required: Some(true),
                ..FieldPatch::default()
            },
        );
        assert_eq!(store.field(id).unwrap().label, "Email");
        assert_eq!(store.history_cursor(), cursor);
        assert_eq!(store.selected_field().unwrap().label, "Email");
    }

    #[test]
    fn move_changes_only_the_origin() {
        let mut store = store();
        let id = store.add_field(
            descriptor_by_id("table").unwrap(),
            Position::new(10.0, 10.0),
        );
        let cursor = store.history_cursor();
        store.move_field(id, Position::new(200.0, 300.0));

        let field = store.field(id).unwrap();
        assert_eq!((field.x, field.y), (200.0, 300.0));
        assert_eq!((field.width, field.height), (300.0, 200.0));
        assert_eq!(store.history_cursor(), cursor);
    }

    #[test]
    fn session_seeds_when_no_initial_fields_are_supplied() {
        let field = descriptor_by_id("checkbox").unwrap().instantiate(
            FieldId::intern("checkbox-seed"),
            "checkbox_seed1".to_string(),
            Position::new(1.0, 2.0),
        );
        let session = MemorySession::seeded(&[field.clone()]);
        let store = FormStore::new(Vec::new(), Box::new(session));
        assert_eq!(store.fields(), &[field]);
    }

    #[test]
    fn caller_supplied_fields_take_precedence_over_the_session() {
        let cached = descriptor_by_id("checkbox").unwrap().instantiate(
            FieldId::intern("checkbox-cached"),
            "checkbox_cached".to_string(),
            Position::default(),
        );
        let supplied = descriptor_by_id("textfield").unwrap().instantiate(
            FieldId::intern("textfield-supplied"),
            "textfield_supplied".to_string(),
            Position::default(),
        );
        let session = MemorySession::seeded(&[cached]);
        let store = FormStore::new(vec![supplied.clone()], Box::new(session));
        assert_eq!(store.fields(), &[supplied]);
    }

    #[test]
    fn save_form_passes_the_collection_through() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(0usize));
        let seen_in_cb = Rc::clone(&seen);

        let mut store = store();
        store.set_on_save(Box::new(move |fields| {
            *seen_in_cb.borrow_mut() = fields.len();
        }));
        store.add_field(descriptor_by_id("button").unwrap(), Position::default());
        store.save_form();
        assert_eq!(*seen.borrow(), 1);
    }
}
