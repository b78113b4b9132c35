// Widget domain model
use super::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every widget is created at this size; the editor has no resize.
pub const DEFAULT_WIDGET_SIZE: Size = Size {
    width: 300.0,
    height: 200.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Metric,
    Chart,
    Table,
    Progress,
}

/// Catalog entry a widget can be instantiated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: WidgetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub default_config: Value,
    #[serde(default)]
    pub default_data: Value,
}

/// A widget placed on the canvas.
///
/// `data` and `config` are owned by the per-kind renderers; the editor copies
/// them around but never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub config: Value,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub position: Point,
    #[serde(default = "default_size")]
    pub size: Size,
    #[serde(default)]
    pub is_standard: bool,
}

fn default_visible() -> bool {
    true
}

fn default_size() -> Size {
    DEFAULT_WIDGET_SIZE
}

impl Widget {
    /// Instantiate a custom widget from template defaults.
    pub fn from_template(id: String, template: &WidgetTemplate, position: Point) -> Self {
        Self {
            id,
            title: template.title.clone(),
            kind: template.kind,
            data: template.default_data.clone(),
            config: template.default_config.clone(),
            visible: true,
            position: position.clamp_non_negative(),
            size: DEFAULT_WIDGET_SIZE,
            is_standard: false,
        }
    }
}
