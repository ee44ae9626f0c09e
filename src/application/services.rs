use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

use crate::{
    application::ports::InferencePort,
    domain::{
        errors::{DomainError, DomainResult},
        report::{summarize_detections, AnalysisReport, ImageUpload},
        screen::{ScreenEvent, ScreenState},
        statistics::SummaryOptions,
    },
};

/// Caso de uso principal: subir una imagen, detectar y resumir.
/// También es el dueño del estado de pantalla que consulta el dashboard.
pub struct AnalysisService {
    inference: Arc<dyn InferencePort>,
    options: SummaryOptions,
    screen: RwLock<ScreenState>,
}

impl AnalysisService {
    pub fn new(inference: Arc<dyn InferencePort>, options: SummaryOptions) -> Self {
        Self {
            inference,
            options,
            screen: RwLock::new(ScreenState::default()),
        }
    }

    pub fn screen(&self) -> DomainResult<ScreenState> {
        let lock = self
            .screen
            .read()
            .map_err(|_| DomainError::OperationFailed("Lock de estado fallido".into()))?;
        Ok(lock.clone())
    }

    /// Analiza una imagen. Sin imagen no se llama al servicio y el estado no cambia.
    /// Solo se admite un análisis a la vez.
    pub async fn analyze(&self, upload: Option<ImageUpload>) -> DomainResult<AnalysisReport> {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => {
                warn!("Análisis solicitado sin imagen");
                return Err(DomainError::NoImage);
            }
        };

        let mut pending = self.begin()?;
        info!(
            "📤 Enviando imagen ({} bytes, {})",
            upload.bytes.len(),
            upload.file_name.as_deref().unwrap_or("sin nombre")
        );

        match self.inference.detect(upload).await {
            Ok(set) => {
                let report = AnalysisReport::build(set, &self.options);
                info!(
                    total = report.statistics.total_items,
                    rows = report.statistics.num_rows,
                    "✅ Detecciones: {}",
                    summarize_detections(&report.predictions)
                );
                pending.finish(ScreenEvent::UploadSucceeded(report.clone()))?;
                Ok(report)
            }
            Err(e) => {
                error!("Error en la inferencia: {}", e);
                pending.finish(ScreenEvent::UploadFailed(e.to_string()))?;
                Err(e)
            }
        }
    }

    fn begin(&self) -> DomainResult<PendingUpload<'_>> {
        let mut lock = self
            .screen
            .write()
            .map_err(|_| DomainError::OperationFailed("Lock de estado fallido".into()))?;
        if lock.is_loading() {
            return Err(DomainError::Busy);
        }
        *lock = std::mem::take(&mut *lock).apply(ScreenEvent::UploadStarted);
        Ok(PendingUpload {
            screen: &self.screen,
            done: false,
        })
    }
}

/// Análisis en curso. Si el futuro se cancela antes de terminar, la pantalla
/// pasa a error en lugar de quedarse en `Loading` para siempre.
struct PendingUpload<'a> {
    screen: &'a RwLock<ScreenState>,
    done: bool,
}

impl PendingUpload<'_> {
    fn finish(&mut self, event: ScreenEvent) -> DomainResult<()> {
        self.done = true;
        let mut lock = self
            .screen
            .write()
            .map_err(|_| DomainError::OperationFailed("Lock de estado fallido".into()))?;
        *lock = std::mem::take(&mut *lock).apply(event);
        Ok(())
    }
}

impl Drop for PendingUpload<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if let Ok(mut lock) = self.screen.write() {
            warn!("Análisis cancelado antes de terminar");
            *lock = std::mem::take(&mut *lock)
                .apply(ScreenEvent::UploadFailed("Análisis cancelado".into()));
        }
    }
}
