use serde::Serialize;

/// Un objeto detectado por el servicio de inferencia (centro de la caja en píxeles).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Detection {
    #[serde(rename = "class")]
    pub class_label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64, // 0..1
}

impl Detection {
    pub fn new(class_label: impl Into<String>, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            class_label: class_label.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            confidence,
        }
    }

    pub fn label(&self) -> ClassLabel<'_> {
        ClassLabel::parse(&self.class_label)
    }
}

/// Etiqueta compuesta `PRODUCTO_TIPO`. El tipo es opcional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassLabel<'a> {
    pub product: &'a str,
    pub kind: Option<&'a str>,
}

impl<'a> ClassLabel<'a> {
    /// Solo cuentan los dos primeros segmentos: `A_B_C` da producto `A` y tipo `B`.
    pub fn parse(label: &'a str) -> Self {
        let mut parts = label.split('_');
        let product = parts.next().unwrap_or(label);
        Self {
            product,
            kind: parts.next(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Todas las detecciones devueltas para una imagen, más los metadatos que
/// el servicio adjunte.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionSet {
    pub detections: Vec<Detection>,
    pub image: Option<ImageSize>,
    pub inference_ms: Option<f64>,
}

impl From<Vec<Detection>> for DetectionSet {
    fn from(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_product_and_type() {
        let label = ClassLabel::parse("RAMY_CANNETTE");
        assert_eq!(label.product, "RAMY");
        assert_eq!(label.kind, Some("CANNETTE"));
    }

    #[test]
    fn label_without_underscore_has_no_type() {
        let label = ClassLabel::parse("BOTTLE");
        assert_eq!(label.product, "BOTTLE");
        assert_eq!(label.kind, None);
    }

    #[test]
    fn only_first_two_segments_are_used() {
        let label = ClassLabel::parse("RAMY_PET_1L");
        assert_eq!(label.product, "RAMY");
        assert_eq!(label.kind, Some("PET"));

        let trailing = ClassLabel::parse("RAMY_");
        assert_eq!(trailing.kind, Some(""));
    }

    #[test]
    fn serializes_label_as_class() {
        let json = serde_json::to_value(Detection::new("COKE_PET", 1.0, 2.0, 0.5)).unwrap();
        assert_eq!(json["class"], "COKE_PET");
        assert!(json.get("class_label").is_none());
    }
}
