// Archivo: errors.rs
// Propósito: errores de la capa de almacenamiento y el alias Result<T>.
use thiserror::Error;

/// Errores comunes de los almacenes.
///
/// - `NotFound`: registro no encontrado.
/// - `Conflict`: duplicado o escritura condicional fallida.
/// - `Storage`: error del almacenamiento subyacente.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
  /// Registro no encontrado (centro, tarea, caso).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// Conflicto: nombre duplicado o la tarea ya no está en STANDBY.
  #[error("Conflicto: {0}")]
  Conflict(String),
  /// Error genérico de almacenamiento (BD, mutex envenenado, etc.).
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, StoreError>;
