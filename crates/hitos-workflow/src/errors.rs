use hitos_domain::DomainError;
use hitos_store::StoreError;
use thiserror::Error;

// Errores del motor de hitos.
//
// `NotFound` y `Conflict` son los que ve el llamador (clave de fase o centro
// desconocidos, nombre duplicado, escritura condicional rechazada). Los
// errores de dominio y de almacenamiento se elevan a esas variantes cuando
// corresponden a ellas.
#[derive(Error, Debug)]
pub enum WorkflowError {
  #[error("No encontrado: {0}")]
  NotFound(String),

  #[error("Conflicto: {0}")]
  Conflict(String),

  #[error("Error de validacion: {0}")]
  Validation(String),

  /// Errores del almacenamiento subyacente.
  #[error("Error de persistencia: {0}")]
  Persistence(String),
}

impl From<DomainError> for WorkflowError {
  fn from(e: DomainError) -> Self {
    match e {
      DomainError::NotFound(m) => WorkflowError::NotFound(m),
      DomainError::ValidationError(m) => WorkflowError::Validation(m),
    }
  }
}

impl From<StoreError> for WorkflowError {
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::NotFound(m) => WorkflowError::NotFound(m),
      StoreError::Conflict(m) => WorkflowError::Conflict(m),
      StoreError::Storage(m) => WorkflowError::Persistence(m),
    }
  }
}
