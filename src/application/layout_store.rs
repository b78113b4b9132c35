// Widget layout store - The editing session's working set
use crate::domain::dashboard::DashboardConfiguration;
use crate::domain::geometry::Point;
use crate::domain::widget::{Widget, WidgetTemplate};
use std::collections::HashSet;

/// Ordered widgets on the canvas plus the current selection.
///
/// Every lookup is keyed by widget id; array order is not meaningful.
#[derive(Debug, Clone, Default)]
pub struct WidgetLayoutStore {
    widgets: Vec<Widget>,
    selected: Option<String>,
    next_seq: u64,
}

impl WidgetLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, widget_id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == widget_id)
    }

    fn get_mut(&mut self, widget_id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == widget_id)
    }

    /// Instantiate `template` at `position` and append it.
    pub fn add(&mut self, template: &WidgetTemplate, position: Point) -> Widget {
        let id = self.next_id(&template.id);
        let widget = Widget::from_template(id, template, position);
        self.widgets.push(widget.clone());
        widget
    }

    /// `{templateId}-{n}`, skipping ids already in the working set.
    fn next_id(&mut self, template_id: &str) -> String {
        loop {
            self.next_seq += 1;
            let candidate = format!("{}-{}", template_id, self.next_seq);
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Replace a widget's position. Unknown ids are ignored; returns whether
    /// anything changed.
    pub fn move_widget(&mut self, widget_id: &str, position: Point) -> bool {
        match self.get_mut(widget_id) {
            Some(widget) => {
                widget.position = position.clamp_non_negative();
                true
            }
            None => false,
        }
    }

    /// Select a widget, or clear the selection with `None`. Selecting an
    /// unknown id clears the selection.
    pub fn select(&mut self, widget_id: Option<&str>) {
        self.selected = widget_id
            .filter(|id| self.get(id).is_some())
            .map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn remove(&mut self, widget_id: &str) -> Option<Widget> {
        let index = self.widgets.iter().position(|w| w.id == widget_id)?;
        if self.selected.as_deref() == Some(widget_id) {
            self.selected = None;
        }
        Some(self.widgets.remove(index))
    }

    pub fn rename(&mut self, widget_id: &str, title: String) -> bool {
        match self.get_mut(widget_id) {
            Some(widget) => {
                widget.title = title;
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, widget_id: &str, visible: bool) -> bool {
        match self.get_mut(widget_id) {
            Some(widget) => {
                widget.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Split the working set by `is_standard` for persistence.
    pub fn partition(&self) -> DashboardConfiguration {
        let (standard_widgets, custom_widgets) =
            self.widgets.iter().cloned().partition(|w| w.is_standard);
        DashboardConfiguration {
            standard_widgets,
            custom_widgets,
        }
    }

    /// Replace the working set with both arrays concatenated. The first
    /// occurrence of a repeated id wins.
    pub fn hydrate(&mut self, standard_widgets: Vec<Widget>, custom_widgets: Vec<Widget>) {
        let mut seen = HashSet::new();
        self.widgets = standard_widgets
            .into_iter()
            .chain(custom_widgets)
            .filter(|widget| {
                let fresh = seen.insert(widget.id.clone());
                if !fresh {
                    tracing::warn!(widget_id = %widget.id, "Dropping widget with duplicate id");
                }
                fresh
            })
            .map(|mut widget| {
                widget.position = widget.position.clamp_non_negative();
                widget
            })
            .collect();
        self.selected = None;
    }
}
