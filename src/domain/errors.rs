use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Please select an image first.")]
    NoImage,
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
    #[error("Ya hay un análisis en curso")]
    Busy,
    /// Fallo HTTP o de transporte hacia el servicio de inferencia.
    #[error("{0}")]
    Upstream(String),
    #[error("Respuesta de inferencia mal formada: {0}")]
    MalformedResponse(String),
    #[error("Error de operación: {0}")]
    OperationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
