// phase_matrix.rs
//
// Matriz estática de fases. Se construye una sola vez (primer acceso) y nunca
// se persiste: las tareas sólo guardan el `phase_id` numérico.
use crate::DomainError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de servicio asociado a una fase; se copia a los casos creados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
  Photography,
  Design,
}

impl ServiceType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ServiceType::Photography => "Photography",
      ServiceType::Design => "Design",
    }
  }
}

impl fmt::Display for ServiceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Entrada de la matriz: clave simbólica, id canónico (1-5, compartido por
/// las variantes de arte y general), tipo de servicio y descripción.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseDefinition {
  pub key: &'static str,
  pub phase_id: u8,
  pub service_type: ServiceType,
  pub description: &'static str,
}

// Orden de declaración: las claves más específicas van primero, porque el
// escaneo por contención se queda con la primera coincidencia.
static PHASES: Lazy<IndexMap<&'static str, PhaseDefinition>> = Lazy::new(|| {
  let defs = [("COMBOS", 1, ServiceType::Photography, "Combos photo session"),
              ("LAUNCH_ART", 2, ServiceType::Design, "Launch artwork"),
              ("LAUNCH", 2, ServiceType::Photography, "Launch event"),
              ("EXTERIOR", 3, ServiceType::Photography, "Exterior photo session"),
              ("PRE_GRADUATION", 4, ServiceType::Photography, "Pre-graduation session"),
              ("GRADUATION_ART", 5, ServiceType::Design, "Graduation artwork"),
              ("GRADUATION", 5, ServiceType::Photography, "Graduation ceremony")];
  defs.into_iter()
      .map(|(key, phase_id, service_type, description)| {
        (key, PhaseDefinition { key, phase_id, service_type, description })
      })
      .collect()
});

/// Acceso de sólo lectura a la matriz de fases.
pub struct PhaseMatrix;

impl PhaseMatrix {
  /// Resuelve una clave de fase.
  ///
  /// Primero busca coincidencia exacta; si no la hay, acepta la primera
  /// clave conocida (en orden de declaración) contenida en `phase_key`.
  /// La clave se recorta y se pasa a mayúsculas antes de comparar.
  pub fn resolve(phase_key: &str) -> Result<&'static PhaseDefinition, DomainError> {
    let key = phase_key.trim().to_ascii_uppercase();
    if let Some(def) = PHASES.get(key.as_str()) {
      return Ok(def);
    }
    PHASES.values()
          .find(|def| key.contains(def.key))
          .ok_or_else(|| DomainError::NotFound(format!("fase '{}'", phase_key)))
  }

  /// Todas las definiciones en orden de declaración.
  pub fn definitions() -> impl Iterator<Item = &'static PhaseDefinition> {
    PHASES.values()
  }

  /// Ids de fase distintos, en orden ascendente.
  pub fn phase_ids() -> Vec<u8> {
    let mut ids: Vec<u8> = PHASES.values().map(|d| d.phase_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
  }
}

/// Indica si el texto de la clave pide activación de arte/diseño.
pub fn is_design_key(phase_key: &str) -> bool {
  let key = phase_key.to_ascii_uppercase();
  key.contains("ART") || key.contains("DESIGN")
}
