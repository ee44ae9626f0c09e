use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{
    errors::DomainResult,
    model::{InferenceEndpoint, ModelId, DEFAULT_API_BASE_URL},
    rows::DEFAULT_ROW_TOLERANCE,
    statistics::SummaryOptions,
};

/// Servidor del dashboard de detección en estanterías.
///
/// Las credenciales del modelo se pasan por flags o variables de entorno.
#[derive(Parser, Debug, Clone)]
#[command(name = "shelf-vision-dashboard", version, about)]
pub struct AppConfig {
    /// Host to bind to
    #[arg(long, env = "SHELF_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SHELF_PORT", default_value_t = 8090)]
    pub port: u16,

    /// Directory with the browser UI
    #[arg(long, env = "SHELF_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Base URL of the hosted detection API
    #[arg(long, env = "ROBOFLOW_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Roboflow model (project) id
    #[arg(long, env = "ROBOFLOW_MODEL_ID")]
    pub model_id: String,

    /// Roboflow model version
    #[arg(long, env = "ROBOFLOW_MODEL_VERSION")]
    pub model_version: String,

    /// Roboflow API key
    #[arg(long, env = "ROBOFLOW_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Maximum y distance (pixels) between neighbours of the same row
    #[arg(long, env = "SHELF_ROW_TOLERANCE", default_value_t = DEFAULT_ROW_TOLERANCE)]
    pub row_tolerance: f64,

    /// Only class counts and rows, without the per-product breakdown
    #[arg(long, env = "SHELF_SIMPLE_STATS")]
    pub simple: bool,

    /// Timeout for the detection request, in seconds
    #[arg(long, env = "ROBOFLOW_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint(&self) -> DomainResult<InferenceEndpoint> {
        let endpoint = InferenceEndpoint {
            base_url: self.api_base_url.clone(),
            model: ModelId {
                project: self.model_id.clone(),
                version: self.model_version.clone(),
            },
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };
        endpoint.validate()?;
        Ok(endpoint)
    }

    pub fn summary_options(&self) -> DomainResult<SummaryOptions> {
        let options = SummaryOptions {
            row_tolerance: self.row_tolerance,
            extended: !self.simple,
        };
        options.validate()?;
        Ok(options)
    }
}
