use serde::{Deserialize, Serialize};

use crate::domain::{model::InferenceEndpoint, statistics::SummaryOptions};

/// Ajustes visibles desde el navegador. La clave de la API no sale de aquí.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicConfig {
    pub model_id: String,
    pub model_version: String,
    pub row_tolerance: f64,
    pub extended: bool,
}

impl PublicConfig {
    pub fn new(endpoint: &InferenceEndpoint, options: &SummaryOptions) -> Self {
        Self {
            model_id: endpoint.model.project.clone(),
            model_version: endpoint.model.version.clone(),
            row_tolerance: options.row_tolerance,
            extended: options.extended,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
