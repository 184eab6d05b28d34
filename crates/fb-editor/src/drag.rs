//! Drag state machine for palette placement and field repositioning.
//!
//! Two drag kinds share one controller: dragging a new component out of
//! the palette, and repositioning a field already on the canvas. The
//! controller tracks the pointer and, on release, yields a `DragCommit`
//! for the caller to apply to the store — the controller itself never
//! mutates fields, preserving a single writer.
//!
//! Pointer-up is the only exit from a drag; there is no cancel
//! transition.

use crate::input::InputEvent;
use fb_core::catalog::ComponentDescriptor;
use fb_core::geom;
use fb_core::id::FieldId;
use fb_core::model::Position;

/// Transient drag-tracking state. Illegal combinations (a new-component
/// drag without its descriptor) are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// A palette component headed for the canvas.
    DraggingNew {
        descriptor: &'static ComponentDescriptor,
        start: Position,
        current: Position,
    },
    /// A placed field being repositioned. `offset` is the pointer-to-
    /// field-origin distance captured at drag start, keeping the grip
    /// point stable under the pointer.
    DraggingExisting {
        field: FieldId,
        start: Position,
        current: Position,
        offset: Position,
    },
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

/// What the pointer went down on, as reported by the presentation layer.
#[derive(Debug, Clone, Copy)]
pub enum DragTarget {
    /// A palette entry for this descriptor.
    PaletteEntry(&'static ComponentDescriptor),
    /// A placed field; `origin` is its rendered top-left in viewport
    /// coordinates.
    Field { id: FieldId, origin: Position },
}

/// A committed drop, applied to the store by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCommit {
    Add {
        descriptor: &'static ComponentDescriptor,
        position: Position,
    },
    Move {
        field: FieldId,
        position: Position,
    },
}

#[derive(Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Pointer position driving the floating preview, if a drag is live.
    pub fn current_position(&self) -> Option<Position> {
        match self.state {
            DragState::Idle => None,
            DragState::DraggingNew { current, .. }
            | DragState::DraggingExisting { current, .. } => Some(current),
        }
    }

    /// The field being repositioned, if any.
    pub fn dragged_field(&self) -> Option<FieldId> {
        match self.state {
            DragState::DraggingExisting { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Feed a pointer event through the machine.
    ///
    /// `target` is what the press landed on (pointer-down only);
    /// `canvas_origin` is the canvas element's viewport top-left at the
    /// time of the event; `read_only` refuses repositioning drags.
    /// Returns a commit exactly when a pointer-up ends a drag.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        target: Option<DragTarget>,
        canvas_origin: Position,
        read_only: bool,
    ) -> Option<DragCommit> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                let pointer = Position::new(*x, *y);
                match target {
                    Some(DragTarget::PaletteEntry(descriptor)) => {
                        self.state = DragState::DraggingNew {
                            descriptor,
                            start: pointer,
                            current: pointer,
                        };
                    }
                    Some(DragTarget::Field { id, origin }) if !read_only => {
                        self.state = DragState::DraggingExisting {
                            field: id,
                            start: pointer,
                            current: pointer,
                            offset: Position::new(pointer.x - origin.x, pointer.y - origin.y),
                        };
                    }
                    _ => {}
                }
                None
            }
            InputEvent::PointerMove { x, y, .. } => {
                let pointer = Position::new(*x, *y);
                match &mut self.state {
                    DragState::DraggingNew { current, .. }
                    | DragState::DraggingExisting { current, .. } => *current = pointer,
                    DragState::Idle => {}
                }
                None
            }
            InputEvent::PointerUp { x, y, .. } => {
                let pointer = Position::new(*x, *y);
                let commit = match self.state {
                    DragState::Idle => None,
                    DragState::DraggingNew { descriptor, .. } => Some(DragCommit::Add {
                        descriptor,
                        position: geom::canvas_position(pointer, canvas_origin),
                    }),
                    DragState::DraggingExisting { field, offset, .. } => Some(DragCommit::Move {
                        field,
                        position: geom::field_position(pointer, offset, canvas_origin),
                    }),
                };
                self.state = DragState::Idle;
                commit
            }
            InputEvent::Key { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use fb_core::catalog::descriptor_by_id;

    const ORIGIN: Position = Position::new(50.0, 50.0);

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_down(x, y, Modifiers::NONE)
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_move(x, y, Modifiers::NONE)
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_up(x, y, Modifiers::NONE)
    }

    #[test]
    fn palette_drop_translates_to_canvas_coordinates() {
        let descriptor = descriptor_by_id("textfield").unwrap();
        let mut controller = DragController::new();

        controller.handle(
            &down(60.0, 70.0),
            Some(DragTarget::PaletteEntry(descriptor)),
            ORIGIN,
            false,
        );
        assert!(controller.is_dragging());

        controller.handle(&mv(120.0, 160.0), None, ORIGIN, false);
        assert_eq!(
            controller.current_position(),
            Some(Position::new(120.0, 160.0))
        );

        let commit = controller.handle(&up(150.0, 200.0), None, ORIGIN, false);
        match commit {
            Some(DragCommit::Add { position, .. }) => {
                assert_eq!((position.x, position.y), (100.0, 150.0));
            }
            other => panic!("expected Add commit, got {other:?}"),
        }
        assert!(!controller.is_dragging());
    }

    #[test]
    fn drop_left_of_the_canvas_clamps_to_zero() {
        let descriptor = descriptor_by_id("checkbox").unwrap();
        let mut controller = DragController::new();
        controller.handle(
            &down(60.0, 70.0),
            Some(DragTarget::PaletteEntry(descriptor)),
            ORIGIN,
            false,
        );
        let commit = controller.handle(&up(10.0, 20.0), None, ORIGIN, false);
        match commit {
            Some(DragCommit::Add { position, .. }) => {
                assert_eq!((position.x, position.y), (0.0, 0.0));
            }
            other => panic!("expected Add commit, got {other:?}"),
        }
    }

    #[test]
    fn existing_drag_keeps_the_grip_point_stable() {
        let id = FieldId::intern("textfield-drag");
        let mut controller = DragController::new();

        // Field rendered at viewport (150, 150); grabbed 12px right,
        // 8px below its corner.
        controller.handle(
            &down(162.0, 158.0),
            Some(DragTarget::Field {
                id,
                origin: Position::new(150.0, 150.0),
            }),
            ORIGIN,
            false,
        );

        let commit = controller.handle(&up(262.0, 258.0), None, ORIGIN, false);
        match commit {
            Some(DragCommit::Move { field, position }) => {
                assert_eq!(field, id);
                // Pointer moved +100/+100, so the field's canvas-relative
                // top-left does too: (150-50-12)+100, (150-50-8)+100.
                assert_eq!((position.x, position.y), (200.0, 200.0));
            }
            other => panic!("expected Move commit, got {other:?}"),
        }
    }

    #[test]
    fn read_only_refuses_existing_field_drags() {
        let id = FieldId::intern("textfield-ro");
        let mut controller = DragController::new();
        controller.handle(
            &down(100.0, 100.0),
            Some(DragTarget::Field {
                id,
                origin: Position::new(90.0, 90.0),
            }),
            ORIGIN,
            true,
        );
        assert!(!controller.is_dragging());
        assert!(controller.handle(&up(110.0, 110.0), None, ORIGIN, true).is_none());
    }

    #[test]
    fn pointer_up_without_a_drag_commits_nothing() {
        let mut controller = DragController::new();
        assert!(controller.handle(&up(5.0, 5.0), None, ORIGIN, false).is_none());
    }

    #[test]
    fn move_without_a_drag_is_ignored() {
        let mut controller = DragController::new();
        controller.handle(&mv(300.0, 300.0), None, ORIGIN, false);
        assert_eq!(*controller.state(), DragState::Idle);
    }
}
