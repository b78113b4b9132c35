// Drag preview - Ghost of the dragged item that follows the pointer
use crate::application::template_catalog::TemplateCatalog;
use crate::domain::drag::{DragKind, DragPayload, DragState};
use crate::domain::geometry::{Point, Size};
use crate::domain::widget::{DEFAULT_WIDGET_SIZE, WidgetKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGhost {
    pub drag_kind: DragKind,
    pub title: String,
    #[serde(rename = "type")]
    pub widget_kind: WidgetKind,
    /// Top-left corner in page coordinates.
    pub position: Point,
    pub size: Size,
}

/// Derive the ghost for the current drag. Reads state only.
pub fn render_preview(state: &DragState, catalog: &TemplateCatalog) -> Option<PreviewGhost> {
    let drag = state.active()?;
    let pointer = drag.current_pointer?;
    let position = pointer - drag.grab_offset;

    let (title, widget_kind, size) = match &drag.payload {
        DragPayload::Template { template } => {
            let template = catalog.resolve(template)?;
            (template.title, template.kind, DEFAULT_WIDGET_SIZE)
        }
        DragPayload::Widget { widget, .. } => (widget.title.clone(), widget.kind, widget.size),
    };

    Some(PreviewGhost {
        drag_kind: drag.payload.kind(),
        title,
        widget_kind,
        position,
        size,
    })
}
