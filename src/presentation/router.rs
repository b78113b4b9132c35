// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::*;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/templates", get(list_templates))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/:id", get(get_dashboard))
        .route("/sessions", post(open_session))
        .route("/sessions/:id", get(get_session).delete(discard_session))
        .route("/sessions/:id/canvas", put(measure_canvas).delete(unmount_canvas))
        .route(
            "/sessions/:id/canvas/size",
            put(resize_canvas).delete(reset_canvas_size),
        )
        .route("/sessions/:id/drag", delete(cancel_drag))
        .route("/sessions/:id/drag/template", post(begin_template_drag))
        .route("/sessions/:id/drag/widget", post(begin_widget_drag))
        .route("/sessions/:id/drag/move", post(move_pointer))
        .route("/sessions/:id/drag/release", post(release_pointer))
        .route("/sessions/:id/select", post(select_widget))
        .route("/sessions/:id/widgets", post(add_widget))
        .route(
            "/sessions/:id/widgets/:widget_id",
            patch(update_widget).delete(remove_widget),
        )
        .route("/sessions/:id/details", put(update_details))
        .route("/sessions/:id/save", post(save_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
