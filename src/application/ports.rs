use async_trait::async_trait;
use crate::domain::{detection::DetectionSet, errors::DomainResult, report::ImageUpload};

/// Servicio externo que detecta objetos en una imagen.
#[async_trait]
pub trait InferencePort: Send + Sync {
    async fn detect(&self, image: ImageUpload) -> DomainResult<DetectionSet>;
}
