use std::sync::Arc;
use crate::application::{dto::PublicConfig, services::AnalysisService};

/// Estado compartido para los manejadores HTTP de Axum.
#[derive(Clone)]
pub struct HttpState {
    /// Caso de uso de análisis; también guarda el estado de pantalla.
    pub analysis: Arc<AnalysisService>,
    pub config: Arc<PublicConfig>,
}
