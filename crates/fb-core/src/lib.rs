pub mod catalog;
pub mod export;
pub mod geom;
pub mod id;
pub mod model;
pub mod session;
pub mod validate;

pub use catalog::{COMPONENT_CATEGORIES, COMPONENT_TYPES, ComponentCategory, ComponentDescriptor};
pub use id::FieldId;
pub use model::{FieldKind, FieldPatch, FormField, Position};
pub use session::{MemorySession, SESSION_KEY, SessionStore};
pub use validate::{validate_field, validate_form};
