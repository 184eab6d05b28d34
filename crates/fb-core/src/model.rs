//! Core data model for form documents.
//!
//! A form is a flat, ordered collection of `FormField`s placed on a
//! fixed-size canvas. Geometry is absolute (top-left origin, pixels).
//! Minimum sizes are advisory — `validate` reports them, mutations never
//! enforce them.

use crate::id::FieldId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas-relative pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ─── Field kinds ─────────────────────────────────────────────────────────

/// The closed set of placeable component kinds.
///
/// Wire tags match the original catalog ids (`textfield`, `checkboxGroup`,
/// …) so exported documents stay readable by existing consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "textfield")]
    TextField,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "checkboxGroup")]
    CheckboxGroup,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "taglist")]
    TagList,
    #[serde(rename = "textview")]
    TextView,
    #[serde(rename = "imageview")]
    ImageView,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "htmlview")]
    HtmlView,
    #[serde(rename = "spacer")]
    Spacer,
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "dynamicList")]
    DynamicList,
    #[serde(rename = "iframe")]
    IFrame,
    #[serde(rename = "button")]
    Button,
}

impl FieldKind {
    /// The wire tag, identical to the serde rename.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TextField => "textfield",
            Self::Checkbox => "checkbox",
            Self::CheckboxGroup => "checkboxGroup",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::TagList => "taglist",
            Self::TextView => "textview",
            Self::ImageView => "imageview",
            Self::Table => "table",
            Self::HtmlView => "htmlview",
            Self::Spacer => "spacer",
            Self::Group => "group",
            Self::DynamicList => "dynamicList",
            Self::IFrame => "iframe",
            Self::Button => "button",
        }
    }

    /// Parse a wire tag back into a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "textfield" => Self::TextField,
            "checkbox" => Self::Checkbox,
            "checkboxGroup" => Self::CheckboxGroup,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "taglist" => Self::TagList,
            "textview" => Self::TextView,
            "imageview" => Self::ImageView,
            "table" => Self::Table,
            "htmlview" => Self::HtmlView,
            "spacer" => Self::Spacer,
            "group" => Self::Group,
            "dynamicList" => Self::DynamicList,
            "iframe" => Self::IFrame,
            "button" => Self::Button,
            _ => return None,
        })
    }
}

// ─── Form field ──────────────────────────────────────────────────────────

/// A single placed, configurable form element.
///
/// Field order in the struct is the key order of exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Unique within the collection, stable for the session.
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display label shown next to the rendered control.
    pub label: String,
    /// Binding key — the variable name the field submits under.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(rename = "readOnly", default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Advisory regex pattern checked by validation, never enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub options: SmallVec<[String; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FormField {
    /// Top-left corner as a `Position`.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Whether a canvas-relative point falls inside this field's rect.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ─── Partial updates ─────────────────────────────────────────────────────

/// A partial update merged into a field by `update_field`.
///
/// Only present keys overwrite; absent keys leave the field untouched
/// (spread semantics — an `Option` property cannot be cleared, only
/// replaced).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub key: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub disabled: Option<bool>,
    #[serde(rename = "readOnly")]
    pub read_only: Option<bool>,
    pub description: Option<String>,
    pub validation: Option<String>,
    pub options: Option<Vec<String>>,
    pub condition: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl FieldPatch {
    /// A patch that sets only the top-left position.
    pub fn position(position: Position) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    /// Merge this patch into `field`.
    pub fn apply_to(&self, field: &mut FormField) {
        if let Some(ref label) = self.label {
            field.label = label.clone();
        }
        if let Some(ref key) = self.key {
            field.key = key.clone();
        }
        if let Some(ref placeholder) = self.placeholder {
            field.placeholder = Some(placeholder.clone());
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(disabled) = self.disabled {
            field.disabled = disabled;
        }
        if let Some(read_only) = self.read_only {
            field.read_only = read_only;
        }
        if let Some(ref description) = self.description {
            field.description = Some(description.clone());
        }
        if let Some(ref validation) = self.validation {
            field.validation = Some(validation.clone());
        }
        if let Some(ref options) = self.options {
            field.options = options.iter().cloned().collect();
        }
        if let Some(ref condition) = self.condition {
            field.condition = Some(condition.clone());
        }
        if let Some(x) = self.x {
            field.x = x;
        }
        if let Some(y) = self.y {
            field.y = y;
        }
        if let Some(width) = self.width {
            field.width = width;
        }
        if let Some(height) = self.height {
            field.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_field() -> FormField {
        FormField {
            id: FieldId::intern("textfield-0"),
            kind: FieldKind::TextField,
            label: "Name".to_string(),
            key: "textfield_abc123xyz".to_string(),
            placeholder: None,
            required: false,
            disabled: false,
            read_only: false,
            description: None,
            validation: None,
            options: SmallVec::new(),
            condition: None,
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 40.0,
        }
    }

    #[test]
    fn kind_tag_roundtrip() {
        for kind in [
            FieldKind::TextField,
            FieldKind::CheckboxGroup,
            FieldKind::DynamicList,
            FieldKind::Button,
        ] {
            assert_eq!(FieldKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(FieldKind::from_tag("blink"), None);
    }

    #[test]
    fn unset_flags_are_omitted_from_json() {
        let json = serde_json::to_string(&sample_field()).unwrap();
        assert!(!json.contains("required"));
        assert!(!json.contains("readOnly"));
        assert!(!json.contains("options"));
    }

    #[test]
    fn json_uses_original_key_names() {
        let mut field = sample_field();
        field.read_only = true;
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains(r#""type":"textfield""#));
        assert!(json.contains(r#""readOnly":true"#));
    }

    #[test]
    fn patch_merges_only_present_keys() {
        let mut field = sample_field();
        let patch = FieldPatch {
            label: Some("Full name".to_string()),
            required: Some(true),
            ..FieldPatch::default()
        };
        patch.apply_to(&mut field);
        assert_eq!(field.label, "Full name");
        assert!(field.required);
        assert_eq!(field.key, "textfield_abc123xyz");
        assert_eq!(field.width, 200.0);
    }

    #[test]
    fn position_patch_touches_only_geometry_origin() {
        let mut field = sample_field();
        FieldPatch::position(Position::new(55.0, 66.0)).apply_to(&mut field);
        assert_eq!((field.x, field.y), (55.0, 66.0));
        assert_eq!((field.width, field.height), (200.0, 40.0));
    }

    #[test]
    fn contains_checks_the_full_rect() {
        let field = sample_field();
        assert!(field.contains(Position::new(10.0, 20.0)));
        assert!(field.contains(Position::new(210.0, 60.0)));
        assert!(!field.contains(Position::new(211.0, 60.0)));
        assert!(!field.contains(Position::new(9.0, 20.0)));
    }
}
