use serde::Serialize;
use std::cmp::Ordering;

use super::detection::Detection;

/// Distancia máxima en `y` (píxeles) entre vecinos consecutivos de una fila.
pub const DEFAULT_ROW_TOLERANCE: f64 = 20.0;

/// Detecciones que comparten balda. Nunca está vacía.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Row {
    items: Vec<Detection>,
}

impl Row {
    fn start(first: Detection) -> Self {
        Self { items: vec![first] }
    }

    pub fn items(&self) -> &[Detection] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Agrupa las detecciones en filas horizontales.
///
/// Se ordena de forma estable por `y` y cada elemento se compara con el
/// último que entró en la fila abierta, no con el primero ni con la media.
/// Una cadena de pasos pequeños puede producir una fila mucho más alta que
/// `tolerance`.
pub fn cluster_rows(detections: &[Detection], tolerance: f64) -> Vec<Row> {
    let mut sorted: Vec<&Detection> = detections.iter().collect();
    // `-0.0` y `0.0` empatan y conservan el orden de entrada.
    sorted.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));

    let mut sorted = sorted.into_iter();
    let mut rows = Vec::new();
    let Some(first) = sorted.next() else {
        return rows;
    };

    let mut last_y = first.y;
    let mut current = Row::start(first.clone());
    for item in sorted {
        if (item.y - last_y).abs() <= tolerance {
            current.items.push(item.clone());
        } else {
            rows.push(std::mem::replace(&mut current, Row::start(item.clone())));
        }
        last_y = item.y;
    }
    rows.push(current);

    rows
}
