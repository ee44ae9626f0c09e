use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::state::HttpState;
use crate::application::dto::{ErrorResponse, HealthResponse, PublicConfig};
use crate::domain::{
    errors::DomainError,
    report::{AnalysisReport, ImageUpload},
    screen::ScreenState,
};

/// Campos multipart aceptados para la imagen.
const IMAGE_FIELDS: [&str; 2] = ["file", "image"];

/// Envoltorio para convertir errores de dominio en respuestas JSON.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NoImage | DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::Busy => StatusCode::CONFLICT,
            DomainError::Upstream(_) | DomainError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            DomainError::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

pub async fn get_config(State(st): State<HttpState>) -> Json<PublicConfig> {
    Json(st.config.as_ref().clone())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_state(State(st): State<HttpState>) -> Result<Json<ScreenState>, ApiError> {
    Ok(Json(st.analysis.screen()?))
}

pub async fn analyze(
    State(st): State<HttpState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::InvalidInput(format!("multipart: {}", e)))?
    {
        if !field.name().is_some_and(|name| IMAGE_FIELDS.contains(&name)) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::InvalidInput(format!("no se pudo leer la imagen: {}", e)))?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let report = st.analysis.analyze(upload).await?;
    Ok(Json(report))
}
