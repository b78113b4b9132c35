// HTTP request handlers
use crate::application::drop_target::DropOutcome;
use crate::application::editor_session::SessionView;
use crate::application::error::EditorError;
use crate::domain::dashboard::Dashboard;
use crate::domain::drag::{ReleaseTarget, TemplateRef};
use crate::domain::geometry::{CanvasRect, Point, Size};
use crate::domain::widget::{Widget, WidgetTemplate};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

type ApiResult<T> = Result<Json<T>, EditorError>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub dashboard_id: Option<i64>,
}

/// A template payload carries either the full template or just its id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateSelector {
    Template(WidgetTemplate),
    TemplateId(String),
}

impl From<TemplateSelector> for TemplateRef {
    fn from(selector: TemplateSelector) -> Self {
        match selector {
            TemplateSelector::Template(template) => TemplateRef::Full(template),
            TemplateSelector::TemplateId(id) => TemplateRef::Id(id),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDragRequest {
    #[serde(flatten)]
    pub template: TemplateSelector,
    pub pointer: Point,
    #[serde(default)]
    pub grab_offset: Point,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDragRequest {
    pub widget_id: String,
    pub pointer: Point,
}

#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    pub pointer: Point,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseRequest {
    pub pointer: Point,
    pub target: ReleaseTarget,
}

#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub drop: DropOutcome,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub widget_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWidgetRequest {
    pub template_id: String,
    #[serde(default)]
    pub position: Point,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWidgetRequest {
    pub title: Option<String>,
    pub visible: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The widget library
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<WidgetTemplate>> {
    Json(state.editor_service.templates().to_vec())
}

pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Dashboard>> {
    Ok(Json(state.editor_service.list_dashboards().await?))
}

pub async fn get_dashboard(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Dashboard> {
    Ok(Json(state.editor_service.get_dashboard(id).await?))
}

/// Start editing; hydrates from the saved dashboard when one is named
pub async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), EditorError> {
    let view = state.editor_service.open_session(request.dashboard_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SessionView> {
    Ok(Json(state.editor_service.view(id).await?))
}

/// Cancel editing: the working set is dropped and nothing is persisted
pub async fn discard_session(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, EditorError> {
    state.editor_service.discard_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn measure_canvas(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(rect): Json<CanvasRect>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.measure_canvas(rect);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn unmount_canvas(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.unmount_canvas();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn resize_canvas(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(size): Json<Size>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.resize_canvas(size);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn reset_canvas_size(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.reset_canvas_size();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn begin_template_drag(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TemplateDragRequest>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.begin_template_drag(request.template.into(), request.pointer, request.grab_offset)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn begin_widget_drag(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<WidgetDragRequest>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.begin_widget_drag(&request.widget_id, request.pointer)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn move_pointer(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<PointerRequest>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.pointer_move(request.pointer)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Pointer released: over the canvas this is a drop, elsewhere a cancel
pub async fn release_pointer(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReleaseRequest>,
) -> ApiResult<ReleaseResponse> {
    let response = state
        .editor_service
        .with_session(id, |session| {
            let drop = session.release(request.pointer, request.target)?;
            Ok(ReleaseResponse {
                drop,
                session: session.view(),
            })
        })
        .await?;
    Ok(Json(response))
}

pub async fn cancel_drag(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.cancel_drag();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

pub async fn select_widget(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.select(request.widget_id.as_deref())?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Toolbar add, outside of a drag
pub async fn add_widget(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddWidgetRequest>,
) -> Result<(StatusCode, Json<Widget>), EditorError> {
    let widget = state
        .editor_service
        .with_session(id, |session| session.add_widget(&request.template_id, request.position))
        .await?;
    Ok((StatusCode::CREATED, Json(widget)))
}

pub async fn update_widget(
    Path((id, widget_id)): Path<(Uuid, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateWidgetRequest>,
) -> ApiResult<Widget> {
    let widget = state
        .editor_service
        .with_session(id, |session| session.update_widget(&widget_id, request.title, request.visible))
        .await?;
    Ok(Json(widget))
}

pub async fn remove_widget(
    Path((id, widget_id)): Path<(Uuid, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Widget> {
    let widget = state
        .editor_service
        .with_session(id, |session| session.remove_widget(&widget_id))
        .await?;
    Ok(Json(widget))
}

pub async fn update_details(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetailsRequest>,
) -> ApiResult<SessionView> {
    let view = state
        .editor_service
        .with_session(id, |session| {
            session.set_details(request.name, request.description);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Partition the working set and hand it to the persistence service
pub async fn save_session(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Dashboard> {
    Ok(Json(state.editor_service.save(id).await?))
}
