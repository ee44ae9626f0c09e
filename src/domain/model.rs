use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::errors::{DomainError, DomainResult};

pub const DEFAULT_API_BASE_URL: &str = "https://detect.roboflow.com";

/// Modelo alojado: proyecto y versión, p. ej. `my-first-project-uvzhp/2`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelId {
    pub project: String,
    pub version: String,
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.version)
    }
}

/// Dónde y con qué credencial se llama al servicio de detección.
#[derive(Clone)]
pub struct InferenceEndpoint {
    pub base_url: String,
    pub model: ModelId,
    pub api_key: String,
    pub timeout: Duration,
}

impl InferenceEndpoint {
    pub fn validate(&self) -> DomainResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(DomainError::InvalidInput("api key empty".into()));
        }
        if self.model.project.trim().is_empty() || self.model.version.trim().is_empty() {
            return Err(DomainError::InvalidInput("model id and version are required".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DomainError::InvalidInput(format!(
                "api base url must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// URL del modelo sin la clave; la clave va aparte como parámetro de query.
    pub fn detect_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.model.project,
            self.model.version
        )
    }
}

// La clave nunca debe acabar en los logs.
impl fmt::Debug for InferenceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceEndpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}
