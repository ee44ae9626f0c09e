use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    detection::{Detection, DetectionSet, ImageSize},
    errors::{DomainError, DomainResult},
};

/// Cuerpo JSON de `detect.roboflow.com`. Los campos que no usamos se ignoran.
/// Solo `predictions` es obligatorio; los metadatos se leen si tienen sentido
/// y si no se descartan.
#[derive(Debug, Deserialize)]
pub struct RoboflowResponse {
    /// Segundos de inferencia en el servidor.
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    pub predictions: Vec<RoboflowPrediction>,
}

#[derive(Debug, Deserialize)]
pub struct RoboflowPrediction {
    pub class: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub confidence: f64,
}

impl RoboflowResponse {
    pub fn parse(body: &[u8]) -> DomainResult<DetectionSet> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|e| DomainError::MalformedResponse(e.to_string()))?;
        Ok(response.into())
    }
}

/// Número JSON o cadena numérica (`640` o `"640"`).
fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_dimension(value: Option<&Value>) -> Option<u32> {
    let n = lenient_number(value?)?;
    (n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

fn image_size(value: &Value) -> Option<ImageSize> {
    Some(ImageSize {
        width: lenient_dimension(value.get("width"))?,
        height: lenient_dimension(value.get("height"))?,
    })
}

impl From<RoboflowPrediction> for Detection {
    fn from(p: RoboflowPrediction) -> Self {
        Self {
            class_label: p.class,
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            confidence: p.confidence,
        }
    }
}

impl From<RoboflowResponse> for DetectionSet {
    fn from(r: RoboflowResponse) -> Self {
        Self {
            detections: r.predictions.into_iter().map(Detection::from).collect(),
            image: r.image.as_ref().and_then(image_size),
            inference_ms: r.time.as_ref().and_then(lenient_number).map(|secs| secs * 1000.0),
        }
    }
}
