use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::adapters::roboflow::response::RoboflowResponse;
use crate::application::ports::InferencePort;
use crate::domain::{
    detection::DetectionSet,
    errors::{DomainError, DomainResult},
    model::InferenceEndpoint,
    report::ImageUpload,
};

/// Cliente del endpoint alojado de Roboflow: un POST multipart por imagen, sin reintentos.
pub struct RoboflowClient {
    client: reqwest::Client,
    endpoint: InferenceEndpoint,
}

impl RoboflowClient {
    pub fn new(endpoint: InferenceEndpoint) -> DomainResult<Self> {
        endpoint.validate()?;
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| DomainError::OperationFailed(format!("cliente HTTP: {}", e)))?;
        Ok(Self { client, endpoint })
    }
}

// Los errores de reqwest incluyen la URL, y con ella la clave: se quita siempre.
fn transport_error(e: reqwest::Error) -> DomainError {
    DomainError::Upstream(e.without_url().to_string())
}

#[async_trait]
impl InferencePort for RoboflowClient {
    async fn detect(&self, image: ImageUpload) -> DomainResult<DetectionSet> {
        let file_name = image.file_name.unwrap_or_else(|| "image".to_string());
        let mut part = Part::bytes(image.bytes).file_name(file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| DomainError::InvalidInput(format!("content type: {}", e)))?;
        }
        let form = Form::new().part("file", part);

        debug!(model = %self.endpoint.model, "POST {}", self.endpoint.detect_url());
        let response = self
            .client
            .post(self.endpoint.detect_url())
            .query(&[("api_key", self.endpoint.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Upstream(format!(
                "HTTP error! Status: {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        RoboflowResponse::parse(&body)
    }
}
