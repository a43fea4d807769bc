// errors.rs
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("No encontrado: {0}")]
  NotFound(String),
  #[error("Error de validación: {0}")]
  ValidationError(String),
}
