// Canvas drop target - Resolves a completed drop into one layout mutation
use crate::application::layout_store::WidgetLayoutStore;
use crate::application::template_catalog::TemplateCatalog;
use crate::domain::drag::{ActiveDrag, DragPayload};
use crate::domain::geometry::{CanvasRect, Point, to_canvas_local};
use crate::domain::widget::{Widget, WidgetTemplate};
use serde::Serialize;

/// Why a drop produced no mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DropRejection {
    CanvasUnmeasured,
    UnknownTemplate { template_id: String },
    WidgetMissing { widget_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropResolution {
    Create {
        template: WidgetTemplate,
        position: Point,
    },
    Relocate {
        widget_id: String,
        position: Point,
    },
    Rejected(DropRejection),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DropOutcome {
    Created {
        widget: Widget,
    },
    #[serde(rename_all = "camelCase")]
    Moved {
        widget_id: String,
        position: Point,
    },
    Rejected {
        rejection: DropRejection,
    },
    Cancelled,
}

/// The canvas as it was measured when the pointer was released.
pub struct CanvasDropTarget<'a> {
    catalog: &'a TemplateCatalog,
    canvas: Option<CanvasRect>,
}

impl<'a> CanvasDropTarget<'a> {
    pub fn new(catalog: &'a TemplateCatalog, canvas: Option<CanvasRect>) -> Self {
        Self { catalog, canvas }
    }

    /// Work out what a drop at `pointer` (page coordinates) should do.
    ///
    /// Templates land where the pointer is. Widgets move by the pointer's
    /// displacement since drag start, so the grab point inside the widget
    /// never causes a jump.
    pub fn resolve(&self, drag: &ActiveDrag, pointer: Point) -> DropResolution {
        let Some(local) = to_canvas_local(self.canvas.as_ref(), pointer) else {
            return DropResolution::Rejected(DropRejection::CanvasUnmeasured);
        };

        match &drag.payload {
            DragPayload::Template { template } => match self.catalog.resolve(template) {
                Some(template) => DropResolution::Create {
                    template,
                    position: local.clamp_non_negative(),
                },
                None => DropResolution::Rejected(DropRejection::UnknownTemplate {
                    template_id: template.id().to_string(),
                }),
            },
            DragPayload::Widget {
                widget_id,
                initial_position,
                ..
            } => DropResolution::Relocate {
                widget_id: widget_id.clone(),
                position: (*initial_position + drag.displacement_to(pointer)).clamp_non_negative(),
            },
        }
    }

    /// Resolve the drop and apply it to `store`.
    pub fn drop_onto(
        &self,
        drag: &ActiveDrag,
        pointer: Point,
        store: &mut WidgetLayoutStore,
    ) -> DropOutcome {
        let outcome = match self.resolve(drag, pointer) {
            DropResolution::Create { template, position } => DropOutcome::Created {
                widget: store.add(&template, position),
            },
            DropResolution::Relocate {
                widget_id,
                position,
            } => {
                if store.move_widget(&widget_id, position) {
                    DropOutcome::Moved {
                        widget_id,
                        position,
                    }
                } else {
                    DropOutcome::Rejected {
                        rejection: DropRejection::WidgetMissing { widget_id },
                    }
                }
            }
            DropResolution::Rejected(rejection) => DropOutcome::Rejected { rejection },
        };

        match &outcome {
            DropOutcome::Created { widget } => tracing::debug!(
                widget_id = %widget.id,
                x = widget.position.x,
                y = widget.position.y,
                "Widget created from template drop"
            ),
            DropOutcome::Moved {
                widget_id,
                position,
            } => tracing::debug!(%widget_id, x = position.x, y = position.y, "Widget moved"),
            DropOutcome::Rejected { rejection } => {
                tracing::warn!(?rejection, "Drop rejected, layout unchanged")
            }
            DropOutcome::Cancelled => {}
        }
        outcome
    }
}
