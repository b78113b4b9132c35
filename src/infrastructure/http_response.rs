// HTTP response mapping for editor errors
use crate::application::error::EditorError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl EditorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EditorError::SessionNotFound(_)
            | EditorError::WidgetNotFound(_)
            | EditorError::DashboardNotFound(_)
            | EditorError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            EditorError::DragInProgress(_) | EditorError::NoActiveDrag => StatusCode::CONFLICT,
            EditorError::InvalidName => StatusCode::UNPROCESSABLE_ENTITY,
            EditorError::Persistence(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for EditorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let EditorError::Persistence(source) = &self {
            tracing::error!(error = %format!("{:#}", source), "Dashboard persistence failed");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drag::DragInProgress;

    #[test]
    fn test_status_codes() {
        assert_eq!(EditorError::WidgetNotFound("w".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(EditorError::from(DragInProgress).status_code(), StatusCode::CONFLICT);
        assert_eq!(EditorError::InvalidName.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            EditorError::Persistence(anyhow::anyhow!("down")).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
