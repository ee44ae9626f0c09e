use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::detection::Detection;
use super::errors::{DomainError, DomainResult};
use super::rows::{cluster_rows, Row, DEFAULT_ROW_TOLERANCE};

/// Producto que se separa del resto en el reparto de dos categorías.
pub const FOCUS_PRODUCT: &str = "RAMY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Cannette,
    Pet,
    Pack,
}

impl ProductType {
    /// Coincidencia exacta; cualquier otro sufijo no es un tipo conocido.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "CANNETTE" => Some(Self::Cannette),
            "PET" => Some(Self::Pet),
            "PACK" => Some(Self::Pack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TypeCounts {
    pub cannette: usize,
    pub pet: usize,
    pub pack: usize,
    pub total: usize,
}

impl TypeCounts {
    fn record(&mut self, kind: ProductType) {
        match kind {
            ProductType::Cannette => self.cannette += 1,
            ProductType::Pet => self.pet += 1,
            ProductType::Pack => self.pack += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub row_tolerance: f64,
    /// Añade el reparto RAMY/otros y la tabla de tipos por producto.
    pub extended: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            extended: true,
        }
    }
}

impl SummaryOptions {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.row_tolerance.is_finite() || self.row_tolerance < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "row tolerance must be a non-negative number, got {}",
                self.row_tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductBreakdown {
    pub ramy_count: usize,
    pub others_count: usize,
    pub type_counts_by_product: IndexMap<String, TypeCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub class_counts: IndexMap<String, usize>,
    pub class_percentages: IndexMap<String, String>,
    pub total_items: usize,
    pub rows: Vec<Row>,
    pub num_rows: usize,
    #[serde(flatten)]
    pub breakdown: Option<ProductBreakdown>,
}

/// `(count / total) * 100` con dos decimales y `%` final.
/// Los empates exactos redondean hacia arriba (3.125 da `3.13`).
pub fn format_percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{}%", to_fixed_2((count as f64 / total as f64) * 100.0))
}

// `{:.2}` redondea los empates a par. Con 1100 decimales la expansión de un
// f64 es exacta, así que basta mirar el tercer decimal.
fn to_fixed_2(value: f64) -> String {
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let digit = |i: usize| {
        frac_part
            .as_bytes()
            .get(i)
            .map_or(0, |b| u64::from(b.saturating_sub(b'0')))
    };

    let mut cents = int_part.parse::<u64>().unwrap_or(0) * 100 + digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        cents += 1;
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Calcula todas las estadísticas de un conjunto de detecciones.
/// Las claves de los mapas conservan el orden de primera aparición.
pub fn summarize(detections: &[Detection], options: &SummaryOptions) -> StatisticsSummary {
    let mut class_counts: IndexMap<String, usize> = IndexMap::new();
    for det in detections {
        *class_counts.entry(det.class_label.clone()).or_insert(0) += 1;
    }

    let total_items = detections.len();
    let class_percentages = class_counts
        .iter()
        .map(|(label, &count)| (label.clone(), format_percentage(count, total_items)))
        .collect();

    let rows = cluster_rows(detections, options.row_tolerance);
    let breakdown = options.extended.then(|| product_breakdown(detections));

    StatisticsSummary {
        class_counts,
        class_percentages,
        total_items,
        num_rows: rows.len(),
        rows,
        breakdown,
    }
}

fn product_breakdown(detections: &[Detection]) -> ProductBreakdown {
    let mut ramy_count = 0;
    let mut others_count = 0;
    let mut type_counts_by_product: IndexMap<String, TypeCounts> = IndexMap::new();

    for det in detections {
        let label = det.label();
        if label.product == FOCUS_PRODUCT {
            ramy_count += 1;
        } else {
            others_count += 1;
        }

        // Los tipos desconocidos no suman en ningún contador, TOTAL incluido.
        if let Some(kind) = label.kind.and_then(ProductType::from_suffix) {
            type_counts_by_product
                .entry(label.product.to_string())
                .or_default()
                .record(kind);
        }
    }

    ProductBreakdown {
        ramy_count,
        others_count,
        type_counts_by_product,
    }
}
