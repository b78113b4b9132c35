// Drag gesture model: payloads and the idle/dragging state machine
use super::geometry::{Point, displacement};
use super::widget::{Widget, WidgetTemplate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a template payload refers to its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateRef {
    Full(WidgetTemplate),
    Id(String),
}

impl TemplateRef {
    pub fn id(&self) -> &str {
        match self {
            TemplateRef::Full(template) => &template.id,
            TemplateRef::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Template,
    Widget,
}

/// What a drag gesture carries.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    Template {
        template: TemplateRef,
    },
    /// `initial_position` is captured once at drag start and is the anchor
    /// the drop displacement is applied to.
    Widget {
        widget_id: String,
        widget: Widget,
        initial_position: Point,
    },
}

impl DragPayload {
    pub fn kind(&self) -> DragKind {
        match self {
            DragPayload::Template { .. } => DragKind::Template,
            DragPayload::Widget { .. } => DragKind::Widget,
        }
    }
}

/// A drag in progress. All pointer positions are page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub payload: DragPayload,
    pub start_pointer: Point,
    /// Pointer position relative to the dragged element's top-left corner.
    pub grab_offset: Point,
    /// `None` until the first pointer move.
    pub current_pointer: Option<Point>,
}

impl ActiveDrag {
    pub fn new(payload: DragPayload, start_pointer: Point, grab_offset: Point) -> Self {
        Self {
            payload,
            start_pointer,
            grab_offset,
            current_pointer: None,
        }
    }

    pub fn displacement_to(&self, pointer: Point) -> Point {
        displacement(self.start_pointer, pointer)
    }

    /// The platform drag image stays hidden; the preview ghost replaces it.
    pub fn suppresses_native_preview(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTarget {
    Canvas,
    Outside,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd {
    Dropped { drag: ActiveDrag, pointer: Point },
    Cancelled { drag: ActiveDrag },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("a drag is already in progress")]
pub struct DragInProgress;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    pub fn begin(&mut self, drag: ActiveDrag) -> Result<(), DragInProgress> {
        if self.is_dragging() {
            return Err(DragInProgress);
        }
        *self = DragState::Dragging(drag);
        Ok(())
    }

    /// Returns false when no drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self {
            DragState::Dragging(drag) => {
                drag.current_pointer = Some(pointer);
                true
            }
            DragState::Idle => false,
        }
    }

    /// End the gesture. The state is idle afterwards whatever the target.
    pub fn release(&mut self, pointer: Point, target: ReleaseTarget) -> Option<DragEnd> {
        let drag = match std::mem::take(self) {
            DragState::Dragging(drag) => drag,
            DragState::Idle => return None,
        };
        Some(match target {
            ReleaseTarget::Canvas => DragEnd::Dropped { drag, pointer },
            ReleaseTarget::Outside => DragEnd::Cancelled { drag },
        })
    }

    pub fn cancel(&mut self) -> Option<ActiveDrag> {
        match std::mem::take(self) {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }
}
