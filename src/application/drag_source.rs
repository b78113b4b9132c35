// Drag sources - Template cards and placed widgets
use crate::domain::drag::{ActiveDrag, DragInProgress, DragPayload, DragState, TemplateRef};
use crate::domain::geometry::Point;
use crate::domain::widget::Widget;

/// Something the user can pick up. Building the source captures its payload;
/// `begin` moves the state machine into `Dragging`.
#[derive(Debug, Clone)]
pub struct DragSource {
    payload: DragPayload,
}

impl DragSource {
    pub fn template(template: TemplateRef) -> Self {
        Self {
            payload: DragPayload::Template { template },
        }
    }

    /// Snapshot the widget, anchoring the drag at its current position.
    pub fn widget(widget: &Widget) -> Self {
        Self {
            payload: DragPayload::Widget {
                widget_id: widget.id.clone(),
                widget: widget.clone(),
                initial_position: widget.position,
            },
        }
    }

    pub fn begin<'s>(
        self,
        state: &'s mut DragState,
        pointer: Point,
        grab_offset: Point,
    ) -> Result<&'s ActiveDrag, DragInProgress> {
        state.begin(ActiveDrag::new(self.payload, pointer, grab_offset))?;
        state.active().ok_or(DragInProgress)
    }
}

/// Whether `widget_id` is the widget currently being dragged.
pub fn is_dragging_widget(state: &DragState, widget_id: &str) -> bool {
    matches!(
        state.active().map(|drag| &drag.payload),
        Some(DragPayload::Widget { widget_id: dragged, .. }) if dragged == widget_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::template_catalog::tests::sample_template;
    use crate::domain::drag::DragKind;
    use crate::domain::widget::WidgetKind;

    #[test]
    fn test_widget_source_captures_initial_position() {
        let template = sample_template("active-jobs", WidgetKind::Metric);
        let mut widget = Widget::from_template("active-jobs-1".to_string(), &template, Point::new(10.0, 10.0));
        let source = DragSource::widget(&widget);
        widget.position = Point::new(999.0, 999.0);

        let mut state = DragState::default();
        let drag = source
            .begin(&mut state, Point::new(25.0, 15.0), Point::new(15.0, 5.0))
            .unwrap();

        match &drag.payload {
            DragPayload::Widget { initial_position, widget_id, .. } => {
                assert_eq!(*initial_position, Point::new(10.0, 10.0));
                assert_eq!(widget_id, "active-jobs-1");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
        assert!(drag.suppresses_native_preview());
        assert!(is_dragging_widget(&state, "active-jobs-1"));
        assert!(!is_dragging_widget(&state, "other"));
    }

    #[test]
    fn test_second_begin_fails() {
        let mut state = DragState::default();
        DragSource::template(TemplateRef::Id("active-jobs".to_string()))
            .begin(&mut state, Point::ORIGIN, Point::ORIGIN)
            .unwrap();

        let again = DragSource::template(TemplateRef::Id("jobs-by-status".to_string()))
            .begin(&mut state, Point::ORIGIN, Point::ORIGIN);
        assert!(again.is_err());
        assert_eq!(state.active().map(|d| d.payload.kind()), Some(DragKind::Template));
    }
}
