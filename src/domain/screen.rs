use serde::Serialize;

use super::report::AnalysisReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Estado de la pantalla del dashboard. Se sustituye entero en cada evento.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenState {
    pub status: ScreenStatus,
    pub data: Option<AnalysisReport>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ScreenEvent {
    UploadStarted,
    UploadSucceeded(AnalysisReport),
    UploadFailed(String),
}

impl ScreenState {
    /// Única función de transición. Los últimos resultados se mantienen
    /// visibles mientras se carga o si la subida falla.
    pub fn apply(self, event: ScreenEvent) -> Self {
        match event {
            ScreenEvent::UploadStarted => Self {
                status: ScreenStatus::Loading,
                data: self.data,
                error: None,
            },
            ScreenEvent::UploadSucceeded(report) => Self {
                status: ScreenStatus::Ready,
                data: Some(report),
                error: None,
            },
            ScreenEvent::UploadFailed(message) => Self {
                status: ScreenStatus::Error,
                data: self.data,
                error: Some(message),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ScreenStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::DetectionSet;
    use crate::domain::statistics::SummaryOptions;

    fn report() -> AnalysisReport {
        AnalysisReport::build(DetectionSet::default(), &SummaryOptions::default())
    }

    #[test]
    fn upload_cycle_reaches_ready() {
        let state = ScreenState::default().apply(ScreenEvent::UploadStarted);
        assert!(state.is_loading());

        let state = state.apply(ScreenEvent::UploadSucceeded(report()));
        assert_eq!(state.status, ScreenStatus::Ready);
        assert!(state.data.is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_keeps_previous_results() {
        let state = ScreenState::default()
            .apply(ScreenEvent::UploadStarted)
            .apply(ScreenEvent::UploadSucceeded(report()))
            .apply(ScreenEvent::UploadStarted)
            .apply(ScreenEvent::UploadFailed("HTTP error! Status: 500".into()));

        assert_eq!(state.status, ScreenStatus::Error);
        assert_eq!(state.error.as_deref(), Some("HTTP error! Status: 500"));
        assert!(state.data.is_some());
    }

    #[test]
    fn new_upload_clears_error() {
        let state = ScreenState::default()
            .apply(ScreenEvent::UploadFailed("boom".into()))
            .apply(ScreenEvent::UploadStarted);
        assert!(state.error.is_none());
    }

    #[test]
    fn serializes_status_in_lowercase() {
        let json = serde_json::to_value(ScreenState::default()).unwrap();
        assert_eq!(json["status"], "idle");
    }
}
