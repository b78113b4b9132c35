// Application state for HTTP handlers
use crate::application::editor_service::EditorService;

#[derive(Clone)]
pub struct AppState {
    pub editor_service: EditorService,
}
