// Dashboard domain model
use super::widget::Widget;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted layout shape: the working set split by `is_standard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfiguration {
    #[serde(default)]
    pub standard_widgets: Vec<Widget>,
    #[serde(default)]
    pub custom_widgets: Vec<Widget>,
}

impl DashboardConfiguration {
    pub fn widget_count(&self) -> usize {
        self.standard_widgets.len() + self.custom_widgets.len()
    }
}

/// What the editor hands to the persistence service on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub configuration: DashboardConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub configuration: DashboardConfiguration,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(id: i64, draft: DashboardDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            configuration: draft.configuration,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a newer draft, keeping identity and creation time.
    pub fn apply(&mut self, draft: DashboardDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.configuration = draft.configuration;
        self.updated_at = now;
    }
}
