//! WASM bridge for the form builder — exposes the Rust editor engine to
//! JavaScript.
//!
//! The host owns the DOM chrome (palette buttons, property inputs,
//! toolbar); this bridge owns all state. Pointer and keyboard events
//! come in as viewport coordinates, commits flow through the store, and
//! `render` repaints the canvas from current state.

mod render2d;
mod storage;

use fb_core::catalog::{self, COMPONENT_CATEGORIES, COMPONENT_TYPES};
use fb_core::export::{export_html, export_json, html_filename, json_filename};
use fb_core::id::FieldId;
use fb_core::model::{FieldPatch, FormField, Position};
use fb_core::validate::validate_form;
use fb_editor::drag::{DragCommit, DragController, DragState, DragTarget};
use fb_editor::input::{InputEvent, Modifiers};
use fb_editor::shortcuts::{ShortcutAction, ShortcutMap};
use fb_editor::store::FormStore;
use render2d::{CanvasTheme, DragGhost};
use storage::LocalStorageSession;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing editor controller.
///
/// Holds the field store and drag controller. All interaction from the
/// host JS goes through this struct.
#[wasm_bindgen]
pub struct FormBuilder {
    store: FormStore,
    drag: DragController,
    /// Viewport top-left of the canvas element, reported by the host.
    canvas_origin: Position,
    width: f64,
    height: f64,
    dark_mode: bool,
    on_export: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl FormBuilder {
    /// Create a new editor controller with the given canvas dimensions.
    /// `initial_json` supplies the starting collection; when absent the
    /// cached session (if any) is restored instead.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, initial_json: Option<String>) -> Self {
        console_error_panic_hook_setup();

        let initial: Vec<FormField> = initial_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default();
        let store = FormStore::new(initial, Box::new(LocalStorageSession::new()));

        Self {
            store,
            drag: DragController::new(),
            canvas_origin: Position::default(),
            width,
            height,
            dark_mode: false,
            on_export: None,
        }
    }

    /// Report the canvas element's on-screen top-left. The host calls
    /// this on mount, scroll, and resize so pointer translation stays
    /// correct.
    pub fn set_canvas_origin(&mut self, x: f32, y: f32) {
        self.canvas_origin = Position::new(x, y);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Set the canvas theme.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.store.set_read_only(read_only);
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Pointer-down over the canvas. Selects and starts repositioning the
    /// topmost field under the pointer, if any. Returns true if a
    /// re-render is needed.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let event = InputEvent::from_pointer_down(x, y, mods);
        let canvas_point = Position::new(x - self.canvas_origin.x, y - self.canvas_origin.y);

        let hit = self
            .store
            .fields()
            .iter()
            .rev()
            .find(|f| f.contains(canvas_point))
            .map(|f| {
                (
                    f.id,
                    Position::new(self.canvas_origin.x + f.x, self.canvas_origin.y + f.y),
                )
            });

        match hit {
            Some((id, origin)) => {
                self.store.select(Some(id));
                self.drag.handle(
                    &event,
                    Some(DragTarget::Field { id, origin }),
                    self.canvas_origin,
                    self.store.read_only(),
                );
                true
            }
            None => false,
        }
    }

    /// Pointer-down on a palette entry, starting a placement drag.
    /// Returns false for unknown type ids or read-only editors.
    pub fn begin_palette_drag(&mut self, type_id: &str, x: f32, y: f32) -> bool {
        if self.store.read_only() {
            return false;
        }
        let Some(descriptor) = catalog::descriptor_by_id(type_id) else {
            return false;
        };
        let event = InputEvent::from_pointer_down(x, y, Modifiers::NONE);
        self.drag.handle(
            &event,
            Some(DragTarget::PaletteEntry(descriptor)),
            self.canvas_origin,
            false,
        );
        true
    }

    /// Palette click-to-add: places the component at the default spot
    /// without a drag.
    pub fn add_from_palette(&mut self, type_id: &str) -> bool {
        if self.store.read_only() {
            return false;
        }
        let Some(descriptor) = catalog::descriptor_by_id(type_id) else {
            return false;
        };
        self.store
            .add_field(descriptor, catalog::CLICK_PLACE_POSITION);
        true
    }

    /// Pointer moved. Returns true while a drag is live (the preview
    /// follows the pointer).
    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let event = InputEvent::from_pointer_move(x, y, mods);
        self.drag
            .handle(&event, None, self.canvas_origin, self.store.read_only());
        self.drag.is_dragging()
    }

    /// Pointer released. Commits a pending drop or move. Returns true if
    /// the collection changed.
    pub fn handle_pointer_up(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let event = InputEvent::from_pointer_up(x, y, mods);
        let commit = self
            .drag
            .handle(&event, None, self.canvas_origin, self.store.read_only());

        match commit {
            Some(DragCommit::Add {
                descriptor,
                position,
            }) => {
                self.store.add_field(descriptor, position);
                true
            }
            Some(DragCommit::Move { field, position }) => {
                self.store.move_field(field, position);
                true
            }
            None => false,
        }
    }

    // ─── Keyboard API ────────────────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let action = match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(action) => action,
            None => return r#"{"changed":false,"action":"none"}"#.to_string(),
        };

        let changed = match action {
            ShortcutAction::Undo => {
                if self.store.read_only() || !self.store.can_undo() {
                    false
                } else {
                    self.store.undo();
                    true
                }
            }
            ShortcutAction::Redo => {
                if self.store.read_only() || !self.store.can_redo() {
                    false
                } else {
                    self.store.redo();
                    true
                }
            }
            ShortcutAction::Save => {
                self.download_json();
                false
            }
            ShortcutAction::Delete => {
                if self.store.read_only() {
                    false
                } else {
                    self.delete_selected()
                }
            }
        };

        let action_name = match action {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Save => "save",
            ShortcutAction::Delete => "delete",
        };
        let c = if changed { "true" } else { "false" };
        format!(r#"{{"changed":{c},"action":"{action_name}"}}"#)
    }

    // ─── Toolbar / store API ─────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let possible = self.store.can_undo();
        self.store.undo();
        possible
    }

    pub fn redo(&mut self) -> bool {
        let possible = self.store.can_redo();
        self.store.redo();
        possible
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Delete the currently selected field. Returns true if one was
    /// deleted.
    pub fn delete_selected(&mut self) -> bool {
        match self.store.selected() {
            Some(id) => {
                self.store.delete_field(id);
                true
            }
            None => false,
        }
    }

    /// Duplicate the currently selected field. Returns true if
    /// duplicated.
    pub fn duplicate_selected(&mut self) -> bool {
        match self.store.selected() {
            Some(id) => {
                self.store.duplicate_field(id);
                true
            }
            None => false,
        }
    }

    pub fn clear_form(&mut self) {
        self.store.clear_form();
    }

    pub fn field_count(&self) -> usize {
        self.store.fields().len()
    }

    /// The whole collection as JSON (property panel, host sync).
    pub fn fields_json(&self) -> String {
        serde_json::to_string(self.store.fields()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Fields in reading order for the preview modal.
    pub fn preview_json(&self) -> String {
        let ordered = fb_core::export::preview_entries(self.store.fields());
        serde_json::to_string(&ordered).unwrap_or_else(|_| "[]".to_string())
    }

    /// Advisory validation findings as `{id: [message, …]}`.
    pub fn validation_json(&self) -> String {
        let report = validate_form(self.store.fields());
        serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── Selection / properties ──────────────────────────────────────────

    /// The currently selected field id, or empty string if none.
    pub fn selected_id(&self) -> String {
        self.store
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// The selected field as JSON, or empty string if none.
    pub fn selected_field_json(&self) -> String {
        self.store
            .selected_field()
            .and_then(|field| serde_json::to_string(field).ok())
            .unwrap_or_default()
    }

    /// Select a field by id (empty string clears). Returns true if the
    /// selection changed to an existing field or was cleared.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            self.store.select(None);
            return true;
        }
        let id = FieldId::intern(id);
        if self.store.field(id).is_some() {
            self.store.select(Some(id));
            true
        } else {
            false
        }
    }

    /// Merge a JSON `FieldPatch` into a field (property panel edits).
    /// Unknown ids and unparsable patches are no-ops.
    pub fn update_field(&mut self, id: &str, patch_json: &str) -> bool {
        if self.store.read_only() {
            return false;
        }
        let Ok(patch) = serde_json::from_str::<FieldPatch>(patch_json) else {
            log::warn!("ignoring unparsable field patch");
            return false;
        };
        self.store.update_field(FieldId::intern(id), &patch);
        true
    }

    /// Merge a JSON `FieldPatch` into the selected field.
    pub fn update_selected(&mut self, patch_json: &str) -> bool {
        match self.store.selected() {
            Some(id) => {
                let id = id.as_str().to_string();
                self.update_field(&id, patch_json)
            }
            None => false,
        }
    }

    // ─── Palette data ────────────────────────────────────────────────────

    /// The component catalog as JSON for the host to render:
    /// `[{id, name, icon, category, width, height}, …]`.
    pub fn palette_json(&self) -> String {
        descriptors_to_json(COMPONENT_TYPES.iter())
    }

    /// Palette categories as JSON: `[{id, name, icon}, …]`.
    pub fn categories_json(&self) -> String {
        let entries: Vec<serde_json::Value> = COMPONENT_CATEGORIES
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "name": c.name,
                    "icon": c.icon,
                })
            })
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Case-insensitive palette search by display name.
    pub fn search_palette(&self, query: &str) -> String {
        descriptors_to_json(catalog::search_descriptors(query).into_iter())
    }

    // ─── Save / export ───────────────────────────────────────────────────

    /// Host callback for the toolbar save action.
    pub fn set_on_save(&mut self, callback: js_sys::Function) {
        self.store.set_on_save(Box::new(move |fields| {
            let json = serde_json::to_string(fields).unwrap_or_else(|_| "[]".to_string());
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }));
    }

    /// Host callback for the toolbar export action.
    pub fn set_on_export(&mut self, callback: js_sys::Function) {
        self.on_export = Some(callback);
    }

    /// Toolbar save: invoke the host save callback with the collection.
    pub fn save(&mut self) {
        self.store.save_form();
    }

    /// Toolbar export: download the HTML document and notify the host.
    pub fn export(&mut self) {
        self.download_html();
        if let Some(callback) = &self.on_export {
            let json = self.fields_json();
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }

    /// The collection serialized as the JSON export document.
    pub fn export_json_string(&self) -> String {
        export_json(self.store.fields())
    }

    /// The collection rendered as a standalone HTML document.
    pub fn export_html_string(&self) -> String {
        export_html(self.store.fields())
    }

    /// Download the JSON export, named with the current timestamp.
    pub fn download_json(&self) -> bool {
        let timestamp = js_sys::Date::now() as u64;
        download_file(
            &json_filename(timestamp),
            &self.export_json_string(),
            "application/json",
        )
        .is_ok()
    }

    /// Download the HTML export, named with the current timestamp.
    pub fn download_html(&self) -> bool {
        let timestamp = js_sys::Date::now() as u64;
        download_file(
            &html_filename(timestamp),
            &self.export_html_string(),
            "text/html",
        )
        .is_ok()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Render the current state to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            CanvasTheme::dark()
        } else {
            CanvasTheme::light()
        };
        let selected_id = self.store.selected();
        let selected = selected_id.as_ref().map(|id| id.as_str());
        render2d::render_form(
            ctx,
            self.store.fields(),
            selected,
            self.ghost().as_ref(),
            &theme,
            self.width,
            self.height,
        );
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

impl FormBuilder {
    /// Floating preview geometry for the live drag, in canvas-local
    /// coordinates.
    fn ghost(&self) -> Option<DragGhost> {
        let current = self.drag.current_position()?;
        match *self.drag.state() {
            DragState::Idle => None,
            DragState::DraggingNew { descriptor, .. } => Some(DragGhost {
                // Preview trails the pointer slightly, like the DOM
                // preview it replaces.
                x: (current.x - self.canvas_origin.x + 10.0) as f64,
                y: (current.y - self.canvas_origin.y + 10.0) as f64,
                width: descriptor.width as f64,
                height: descriptor.height as f64,
                label: descriptor.name.to_string(),
                placing_new: true,
            }),
            DragState::DraggingExisting { field, offset, .. } => {
                let f = self.store.field(field)?;
                Some(DragGhost {
                    x: (current.x - offset.x - self.canvas_origin.x) as f64,
                    y: (current.y - offset.y - self.canvas_origin.y) as f64,
                    width: f.width as f64,
                    height: f.height as f64,
                    label: f.label.clone(),
                    placing_new: false,
                })
            }
        }
    }
}

fn descriptors_to_json<'a>(
    descriptors: impl Iterator<Item = &'a catalog::ComponentDescriptor>,
) -> String {
    let entries: Vec<serde_json::Value> = descriptors
        .map(|d| {
            serde_json::json!({
                "id": d.kind.tag(),
                "name": d.name,
                "icon": d.icon,
                "category": d.category,
                "width": d.width,
                "height": d.height,
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Create a Blob for `content` and click a temporary anchor to save it.
fn download_file(filename: &str, content: &str, mime: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let body = document.body().ok_or("no body")?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}

/// Route panics to the browser console instead of an opaque trap.
fn console_error_panic_hook_setup() {
    use std::sync::Once;
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&info.to_string().into());
        }));
    });
}
