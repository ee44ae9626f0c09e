use indexmap::IndexMap;
use serde::Serialize;

use super::detection::{Detection, DetectionSet, ImageSize};
use super::statistics::{summarize, StatisticsSummary, SummaryOptions};

/// Imagen subida por el usuario, tal como llega al servidor.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resultado completo de analizar una imagen.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub image: Option<ImageSize>,
    pub inference_ms: Option<f64>,
    pub predictions: Vec<Detection>,
    pub statistics: StatisticsSummary,
}

impl AnalysisReport {
    pub fn build(set: DetectionSet, options: &SummaryOptions) -> Self {
        let statistics = summarize(&set.detections, options);
        Self {
            image: set.image,
            inference_ms: set.inference_ms,
            predictions: set.detections,
            statistics,
        }
    }
}

/// Resumen de una línea para los logs, p. ej. `2 RAMY_PET, 1 COKE_PET`.
pub fn summarize_detections(detections: &[Detection]) -> String {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for det in detections {
        *counts.entry(det.class_label.as_str()).or_insert(0) += 1;
    }
    counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect::<Vec<_>>()
        .join(", ")
}
