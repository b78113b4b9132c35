// Editor errors surfaced to callers of the editor service
use crate::domain::drag::DragInProgress;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor session {0} not found")]
    SessionNotFound(Uuid),

    #[error("widget {0} not found")]
    WidgetNotFound(String),

    #[error("dashboard {0} not found")]
    DashboardNotFound(i64),

    #[error("widget template {0} not found")]
    TemplateNotFound(String),

    #[error(transparent)]
    DragInProgress(#[from] DragInProgress),

    #[error("no drag in progress")]
    NoActiveDrag,

    #[error("dashboard name must not be empty")]
    InvalidName,

    #[error("failed to persist dashboard")]
    Persistence(#[source] anyhow::Error),
}
