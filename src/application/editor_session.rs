// Editor session - Drives the drag state machine against one working set
use crate::application::drag_source::{DragSource, is_dragging_widget};
use crate::application::drop_target::{CanvasDropTarget, DropOutcome};
use crate::application::error::EditorError;
use crate::application::layout_store::WidgetLayoutStore;
use crate::application::preview::{PreviewGhost, render_preview};
use crate::application::template_catalog::TemplateCatalog;
use crate::domain::dashboard::{Dashboard, DashboardDraft};
use crate::domain::drag::{DragEnd, DragKind, DragPayload, DragState, ReleaseTarget, TemplateRef};
use crate::domain::geometry::{CanvasRect, Point, Size};
use crate::domain::widget::Widget;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canvas size bounds. The size is informational; widgets are not kept
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasLimits {
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for CanvasLimits {
    fn default() -> Self {
        Self {
            default_width: 800.0,
            default_height: 600.0,
            min_width: 400.0,
            max_width: 1600.0,
            min_height: 300.0,
            max_height: 1200.0,
        }
    }
}

impl CanvasLimits {
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWidget {
    #[serde(flatten)]
    pub widget: Widget,
    pub selected: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragView {
    pub kind: DragKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub native_drag_image: bool,
}

/// Snapshot of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub dashboard_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub canvas_size: Size,
    pub canvas_measured: bool,
    pub widget_count: usize,
    pub widgets: Vec<PlacedWidget>,
    pub selected_widget_id: Option<String>,
    pub drag: Option<DragView>,
    pub preview: Option<PreviewGhost>,
}

pub struct EditorSession {
    id: Uuid,
    dashboard_id: Option<i64>,
    name: String,
    description: String,
    catalog: TemplateCatalog,
    limits: CanvasLimits,
    canvas_size: Size,
    canvas_rect: Option<CanvasRect>,
    store: WidgetLayoutStore,
    drag: DragState,
}

impl EditorSession {
    /// Start editing `dashboard`, or a blank dashboard when `None`.
    pub fn open(
        id: Uuid,
        catalog: TemplateCatalog,
        limits: CanvasLimits,
        dashboard: Option<&Dashboard>,
    ) -> Self {
        let mut store = WidgetLayoutStore::new();
        if let Some(dashboard) = dashboard {
            store.hydrate(
                dashboard.configuration.standard_widgets.clone(),
                dashboard.configuration.custom_widgets.clone(),
            );
        }

        Self {
            id,
            dashboard_id: dashboard.map(|d| d.id),
            name: dashboard.map(|d| d.name.clone()).unwrap_or_default(),
            description: dashboard.map(|d| d.description.clone()).unwrap_or_default(),
            catalog,
            limits,
            canvas_size: limits.default_size(),
            canvas_rect: None,
            store,
            drag: DragState::default(),
        }
    }

    pub fn dashboard_id(&self) -> Option<i64> {
        self.dashboard_id
    }

    pub fn store(&self) -> &WidgetLayoutStore {
        &self.store
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn measure_canvas(&mut self, rect: CanvasRect) {
        self.canvas_rect = Some(rect);
    }

    pub fn unmount_canvas(&mut self) {
        self.canvas_rect = None;
    }

    pub fn resize_canvas(&mut self, size: Size) -> Size {
        self.canvas_size = self.limits.clamp(size);
        self.canvas_size
    }

    pub fn reset_canvas_size(&mut self) -> Size {
        self.canvas_size = self.limits.default_size();
        self.canvas_size
    }

    pub fn begin_template_drag(
        &mut self,
        template: TemplateRef,
        pointer: Point,
        grab_offset: Point,
    ) -> Result<(), EditorError> {
        let template_id = template.id().to_string();
        DragSource::template(template).begin(&mut self.drag, pointer, grab_offset)?;
        tracing::debug!(session_id = %self.id, %template_id, "Template drag started");
        Ok(())
    }

    /// Pick up a placed widget. The grab offset is measured against the
    /// widget's on-screen corner when the canvas has been measured.
    pub fn begin_widget_drag(&mut self, widget_id: &str, pointer: Point) -> Result<(), EditorError> {
        let widget = self
            .store
            .get(widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(widget_id.to_string()))?;
        let grab_offset = self
            .canvas_rect
            .map(|rect| pointer - (rect.origin() + widget.position))
            .unwrap_or(Point::ORIGIN);

        DragSource::widget(widget).begin(&mut self.drag, pointer, grab_offset)?;
        tracing::debug!(session_id = %self.id, %widget_id, "Widget drag started");
        Ok(())
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Result<(), EditorError> {
        if self.drag.pointer_move(pointer) {
            Ok(())
        } else {
            Err(EditorError::NoActiveDrag)
        }
    }

    /// Finish the gesture. Only a release over the canvas can change the
    /// working set, and then by exactly one mutation.
    pub fn release(&mut self, pointer: Point, target: ReleaseTarget) -> Result<DropOutcome, EditorError> {
        match self.drag.release(pointer, target) {
            Some(DragEnd::Dropped { drag, pointer }) => {
                let drop_target = CanvasDropTarget::new(&self.catalog, self.canvas_rect);
                Ok(drop_target.drop_onto(&drag, pointer, &mut self.store))
            }
            Some(DragEnd::Cancelled { .. }) => {
                tracing::debug!(session_id = %self.id, "Drag released outside canvas");
                Ok(DropOutcome::Cancelled)
            }
            None => Err(EditorError::NoActiveDrag),
        }
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drag.cancel().is_some()
    }

    pub fn preview(&self) -> Option<PreviewGhost> {
        render_preview(&self.drag, &self.catalog)
    }

    pub fn select(&mut self, widget_id: Option<&str>) -> Result<(), EditorError> {
        if let Some(id) = widget_id {
            if self.store.get(id).is_none() {
                return Err(EditorError::WidgetNotFound(id.to_string()));
            }
        }
        self.store.select(widget_id);
        Ok(())
    }

    /// Toolbar add, outside of any drag.
    pub fn add_widget(&mut self, template_id: &str, position: Point) -> Result<Widget, EditorError> {
        let template = self
            .catalog
            .get(template_id)
            .ok_or_else(|| EditorError::TemplateNotFound(template_id.to_string()))?;
        Ok(self.store.add(template, position))
    }

    pub fn remove_widget(&mut self, widget_id: &str) -> Result<Widget, EditorError> {
        self.store
            .remove(widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(widget_id.to_string()))
    }

    pub fn update_widget(
        &mut self,
        widget_id: &str,
        title: Option<String>,
        visible: Option<bool>,
    ) -> Result<Widget, EditorError> {
        if self.store.get(widget_id).is_none() {
            return Err(EditorError::WidgetNotFound(widget_id.to_string()));
        }
        if let Some(title) = title {
            self.store.rename(widget_id, title);
        }
        if let Some(visible) = visible {
            self.store.set_visible(widget_id, visible);
        }
        self.store
            .get(widget_id)
            .cloned()
            .ok_or_else(|| EditorError::WidgetNotFound(widget_id.to_string()))
    }

    pub fn set_details(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }

    /// Partition the working set for the persistence service.
    pub fn save_request(&self) -> Result<DashboardDraft, EditorError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EditorError::InvalidName);
        }
        Ok(DashboardDraft {
            name: name.to_string(),
            description: self.description.clone(),
            configuration: self.store.partition(),
        })
    }

    pub fn mark_saved(&mut self, dashboard: &Dashboard) {
        self.dashboard_id = Some(dashboard.id);
        self.name = dashboard.name.clone();
        self.description = dashboard.description.clone();
    }

    pub fn view(&self) -> SessionView {
        let selected = self.store.selected_id();
        let widgets = self
            .store
            .widgets()
            .iter()
            .map(|widget| PlacedWidget {
                selected: selected == Some(widget.id.as_str()),
                dragging: is_dragging_widget(&self.drag, &widget.id),
                widget: widget.clone(),
            })
            .collect();

        let drag = self.drag.active().map(|drag| {
            let (widget_id, template_id) = match &drag.payload {
                DragPayload::Template { template } => (None, Some(template.id().to_string())),
                DragPayload::Widget { widget_id, .. } => (Some(widget_id.clone()), None),
            };
            DragView {
                kind: drag.payload.kind(),
                widget_id,
                template_id,
                native_drag_image: !drag.suppresses_native_preview(),
            }
        });

        SessionView {
            session_id: self.id,
            dashboard_id: self.dashboard_id,
            name: self.name.clone(),
            description: self.description.clone(),
            canvas_size: self.canvas_size,
            canvas_measured: self.canvas_rect.is_some(),
            widget_count: self.store.len(),
            widgets,
            selected_widget_id: selected.map(str::to_string),
            drag,
            preview: self.preview(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::drop_target::DropRejection;
    use crate::application::template_catalog::tests::sample_catalog;
    use crate::domain::widget::DEFAULT_WIDGET_SIZE;

    const CANVAS: CanvasRect = CanvasRect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn session() -> EditorSession {
        let mut session = EditorSession::open(Uuid::new_v4(), sample_catalog(), CanvasLimits::default(), None);
        session.measure_canvas(CANVAS);
        session
    }

    fn drop_template(session: &mut EditorSession, id: &str, at: Point) -> DropOutcome {
        session
            .begin_template_drag(TemplateRef::Id(id.to_string()), at, Point::ORIGIN)
            .unwrap();
        session.release(at, ReleaseTarget::Canvas).unwrap()
    }

    #[test]
    fn test_place_then_move_scenario() {
        let mut session = session();

        let DropOutcome::Created { widget } = drop_template(&mut session, "active-jobs", Point::new(40.0, 60.0)) else {
            panic!("expected a widget");
        };
        assert_eq!(session.store().len(), 1);
        assert_eq!(widget.position, Point::new(40.0, 60.0));
        assert_eq!(widget.size, DEFAULT_WIDGET_SIZE);

        // Pointer (100, 100) is 60/40 inside the widget; the anchor does not matter.
        session.begin_widget_drag(&widget.id, Point::new(100.0, 100.0)).unwrap();
        session.pointer_move(Point::new(180.0, 130.0)).unwrap();
        let outcome = session.release(Point::new(220.0, 160.0), ReleaseTarget::Canvas).unwrap();

        assert_eq!(
            outcome,
            DropOutcome::Moved {
                widget_id: widget.id.clone(),
                position: Point::new(160.0, 120.0)
            }
        );
        assert_eq!(session.store().widgets()[0].position, Point::new(160.0, 120.0));
        assert!(!session.drag_state().is_dragging());
    }

    #[test]
    fn test_release_outside_leaves_working_set_untouched() {
        let mut session = session();
        drop_template(&mut session, "active-jobs", Point::new(40.0, 60.0));
        let before = session.store().widgets().to_vec();
        let id = before[0].id.clone();

        session.begin_widget_drag(&id, Point::new(50.0, 70.0)).unwrap();
        session.pointer_move(Point::new(900.0, 900.0)).unwrap();
        let outcome = session.release(Point::new(900.0, 900.0), ReleaseTarget::Outside).unwrap();

        assert_eq!(outcome, DropOutcome::Cancelled);
        assert_eq!(session.store().widgets(), before.as_slice());

        session
            .begin_template_drag(TemplateRef::Id("jobs-by-status".to_string()), Point::ORIGIN, Point::ORIGIN)
            .unwrap();
        assert!(session.cancel_drag());
        assert_eq!(session.store().widgets(), before.as_slice());
    }

    #[test]
    fn test_drop_with_unmounted_canvas_is_rejected() {
        let mut session = session();
        session.unmount_canvas();

        let outcome = drop_template(&mut session, "active-jobs", Point::new(40.0, 60.0));
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                rejection: DropRejection::CanvasUnmeasured
            }
        );
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_drag_errors() {
        let mut session = session();
        assert!(matches!(
            session.release(Point::ORIGIN, ReleaseTarget::Canvas),
            Err(EditorError::NoActiveDrag)
        ));
        assert!(matches!(
            session.pointer_move(Point::ORIGIN),
            Err(EditorError::NoActiveDrag)
        ));
        assert!(matches!(
            session.begin_widget_drag("nope", Point::ORIGIN),
            Err(EditorError::WidgetNotFound(_))
        ));

        session
            .begin_template_drag(TemplateRef::Id("active-jobs".to_string()), Point::ORIGIN, Point::ORIGIN)
            .unwrap();
        assert!(matches!(
            session.begin_template_drag(TemplateRef::Id("active-jobs".to_string()), Point::ORIGIN, Point::ORIGIN),
            Err(EditorError::DragInProgress(_))
        ));
    }

    #[test]
    fn test_view_reports_drag_and_preview() {
        let mut session = session();
        drop_template(&mut session, "active-jobs", Point::new(40.0, 60.0));
        let id = session.store().widgets()[0].id.clone();
        session.select(Some(&id)).unwrap();

        session.begin_widget_drag(&id, Point::new(50.0, 70.0)).unwrap();
        let view = session.view();
        assert!(view.preview.is_none());
        assert!(view.widgets[0].dragging);
        assert!(view.widgets[0].selected);
        let drag = view.drag.unwrap();
        assert_eq!(drag.kind, DragKind::Widget);
        assert!(!drag.native_drag_image);

        session.pointer_move(Point::new(60.0, 90.0)).unwrap();
        let preview = session.view().preview.unwrap();
        assert_eq!(preview.position, Point::new(50.0, 80.0));
    }

    #[test]
    fn test_save_request_validates_and_partitions() {
        let mut session = session();
        drop_template(&mut session, "active-jobs", Point::new(40.0, 60.0));
        assert!(matches!(session.save_request(), Err(EditorError::InvalidName)));

        session.set_details("  Shift overview ".to_string(), "Day shift".to_string());
        let draft = session.save_request().unwrap();
        assert_eq!(draft.name, "Shift overview");
        assert_eq!(draft.configuration.custom_widgets.len(), 1);
        assert!(draft.configuration.standard_widgets.is_empty());
    }

    #[test]
    fn test_widget_edits_and_toolbar_add() {
        let mut session = session();
        let widget = session.add_widget("resource-status", Point::new(-10.0, 20.0)).unwrap();
        assert_eq!(widget.position, Point::new(0.0, 20.0));
        assert!(matches!(
            session.add_widget("missing", Point::ORIGIN),
            Err(EditorError::TemplateNotFound(_))
        ));

        let updated = session
            .update_widget(&widget.id, Some("Machines".to_string()), Some(false))
            .unwrap();
        assert_eq!(updated.title, "Machines");
        assert!(!updated.visible);

        session.remove_widget(&widget.id).unwrap();
        assert!(session.store().is_empty());
        assert!(matches!(
            session.remove_widget(&widget.id),
            Err(EditorError::WidgetNotFound(_))
        ));
    }

    #[test]
    fn test_canvas_size_is_clamped_and_resettable() {
        let mut session = session();
        assert_eq!(session.resize_canvas(Size::new(2000.0, 100.0)), Size::new(1600.0, 300.0));
        assert_eq!(session.reset_canvas_size(), Size::new(800.0, 600.0));
    }
}
