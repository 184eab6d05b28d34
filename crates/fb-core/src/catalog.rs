//! Static component catalog.
//!
//! Descriptors are the palette's source of truth: one entry per placeable
//! kind, carrying the display name, icon slug, category, and default
//! geometry used when a drop instantiates a new field. Loaded once,
//! never mutated at runtime.

use crate::id::FieldId;
use crate::model::{FieldKind, FormField, Position};
use smallvec::SmallVec;

/// A palette category header.
#[derive(Debug, Clone, Copy)]
pub struct ComponentCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// A static catalog entry describing an instantiable field type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentDescriptor {
    pub kind: FieldKind,
    pub name: &'static str,
    /// Icon slug; the host maps it to an actual asset.
    pub icon: &'static str,
    pub category: &'static str,
    /// Default geometry applied on instantiation.
    pub width: f32,
    pub height: f32,
}

pub const COMPONENT_CATEGORIES: &[ComponentCategory] = &[
    ComponentCategory {
        id: "controls",
        name: "Form Controls",
        icon: "check-square",
    },
    ComponentCategory {
        id: "presentation",
        name: "Presentation",
        icon: "type",
    },
    ComponentCategory {
        id: "containers",
        name: "Containers",
        icon: "layout",
    },
    ComponentCategory {
        id: "actions",
        name: "Actions",
        icon: "mouse-pointer",
    },
];

pub const COMPONENT_TYPES: &[ComponentDescriptor] = &[
    // Form controls
    ComponentDescriptor {
        kind: FieldKind::TextField,
        name: "Text Field",
        icon: "type",
        category: "controls",
        width: 200.0,
        height: 40.0,
    },
    ComponentDescriptor {
        kind: FieldKind::Checkbox,
        name: "Checkbox",
        icon: "check-square",
        category: "controls",
        width: 120.0,
        height: 40.0,
    },
    ComponentDescriptor {
        kind: FieldKind::CheckboxGroup,
        name: "Checkbox Group",
        icon: "grid-3x3",
        category: "controls",
        width: 200.0,
        height: 80.0,
    },
    ComponentDescriptor {
        kind: FieldKind::Radio,
        name: "Radio Group",
        icon: "circle",
        category: "controls",
        width: 200.0,
        height: 80.0,
    },
    ComponentDescriptor {
        kind: FieldKind::Select,
        name: "Select",
        icon: "list",
        category: "controls",
        width: 200.0,
        height: 40.0,
    },
    ComponentDescriptor {
        kind: FieldKind::TagList,
        name: "Tag List",
        icon: "square",
        category: "controls",
        width: 300.0,
        height: 80.0,
    },
    // Presentation
    ComponentDescriptor {
        kind: FieldKind::TextView,
        name: "Text View",
        icon: "type",
        category: "presentation",
        width: 200.0,
        height: 40.0,
    },
    ComponentDescriptor {
        kind: FieldKind::ImageView,
        name: "Image View",
        icon: "image",
        category: "presentation",
        width: 200.0,
        height: 150.0,
    },
    ComponentDescriptor {
        kind: FieldKind::Table,
        name: "Table",
        icon: "table",
        category: "presentation",
        width: 300.0,
        height: 200.0,
    },
    ComponentDescriptor {
        kind: FieldKind::HtmlView,
        name: "HTML View",
        icon: "file-text",
        category: "presentation",
        width: 200.0,
        height: 100.0,
    },
    ComponentDescriptor {
        kind: FieldKind::Spacer,
        name: "Spacer",
        icon: "minus",
        category: "presentation",
        width: 200.0,
        height: 20.0,
    },
    // Containers
    ComponentDescriptor {
        kind: FieldKind::Group,
        name: "Group",
        icon: "square",
        category: "containers",
        width: 300.0,
        height: 200.0,
    },
    ComponentDescriptor {
        kind: FieldKind::DynamicList,
        name: "Dynamic List",
        icon: "list",
        category: "containers",
        width: 300.0,
        height: 150.0,
    },
    ComponentDescriptor {
        kind: FieldKind::IFrame,
        name: "IFrame",
        icon: "layout",
        category: "containers",
        width: 300.0,
        height: 200.0,
    },
    // Actions
    ComponentDescriptor {
        kind: FieldKind::Button,
        name: "Button",
        icon: "square",
        category: "actions",
        width: 100.0,
        height: 40.0,
    },
];

// ─── Canvas configuration ────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_MIN_HEIGHT: f32 = 400.0;
pub const CANVAS_PADDING: f32 = 40.0;

/// Where click-to-add (as opposed to drag) places a new field.
pub const CLICK_PLACE_POSITION: Position = Position { x: 100.0, y: 100.0 };

// ─── Lookups ─────────────────────────────────────────────────────────────

/// Find a descriptor by its wire tag (e.g. `"textfield"`).
pub fn descriptor_by_id(id: &str) -> Option<&'static ComponentDescriptor> {
    COMPONENT_TYPES.iter().find(|d| d.kind.tag() == id)
}

/// Find a descriptor for a field kind.
pub fn descriptor_for_kind(kind: FieldKind) -> Option<&'static ComponentDescriptor> {
    COMPONENT_TYPES.iter().find(|d| d.kind == kind)
}

/// All descriptors in a palette category, in catalog order.
pub fn descriptors_in_category(category: &str) -> Vec<&'static ComponentDescriptor> {
    COMPONENT_TYPES
        .iter()
        .filter(|d| d.category == category)
        .collect()
}

pub fn category_by_id(id: &str) -> Option<&'static ComponentCategory> {
    COMPONENT_CATEGORIES.iter().find(|c| c.id == id)
}

/// Case-insensitive substring search over display names.
pub fn search_descriptors(query: &str) -> Vec<&'static ComponentDescriptor> {
    let needle = query.trim().to_ascii_lowercase();
    COMPONENT_TYPES
        .iter()
        .filter(|d| d.name.to_ascii_lowercase().contains(&needle))
        .collect()
}

impl ComponentDescriptor {
    /// Instantiate a new field from this descriptor's defaults.
    ///
    /// The label starts as the display name; id and binding key are
    /// supplied by the caller (the store owns uniqueness).
    pub fn instantiate(&self, id: FieldId, key: String, position: Position) -> FormField {
        FormField {
            id,
            kind: self.kind,
            label: self.name.to_string(),
            key,
            placeholder: None,
            required: false,
            disabled: false,
            read_only: false,
            description: None,
            validation: None,
            options: SmallVec::new(),
            condition: None,
            x: position.x,
            y: position.y,
            width: self.width,
            height: self.height,
        }
    }
}
