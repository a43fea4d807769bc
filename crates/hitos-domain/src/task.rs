// task.rs
use crate::{DomainError, ServiceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Autor usado en las entradas de historial generadas por el sistema.
pub const SYSTEM_AUTHOR: &str = "SYSTEM";

/// Estados de una tarea (pendiente/hito). Los nombres serializados son los
/// que usa el almacenamiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
  #[serde(rename = "STANDBY")]
  Standby,
  #[serde(rename = "Pendiente")]
  Pendiente,
  #[serde(rename = "Por Asignar")]
  PorAsignar,
  #[serde(rename = "Iniciado")]
  Iniciado,
  #[serde(rename = "Fuera de oficina")]
  FueraDeOficina,
  #[serde(rename = "Concluido")]
  Concluido,
  #[serde(rename = "En administración")]
  EnAdministracion,
}

impl TaskStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      TaskStatus::Standby => "STANDBY",
      TaskStatus::Pendiente => "Pendiente",
      TaskStatus::PorAsignar => "Por Asignar",
      TaskStatus::Iniciado => "Iniciado",
      TaskStatus::FueraDeOficina => "Fuera de oficina",
      TaskStatus::Concluido => "Concluido",
      TaskStatus::EnAdministracion => "En administración",
    }
  }

  pub fn all() -> [TaskStatus; 7] {
    [TaskStatus::Standby,
     TaskStatus::Pendiente,
     TaskStatus::PorAsignar,
     TaskStatus::Iniciado,
     TaskStatus::FueraDeOficina,
     TaskStatus::Concluido,
     TaskStatus::EnAdministracion]
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TaskStatus {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_lowercase();
    TaskStatus::all().into_iter()
                     .find(|st| st.as_str().to_lowercase() == wanted)
                     .ok_or_else(|| DomainError::ValidationError(format!("estado de tarea desconocido: {}", s)))
  }
}

/// Tipo de trabajo dentro de una fase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
  Collection,
  Survey,
  Art,
  Magazine,
  Mural,
  Script,
  Program,
  Certificates,
  Videos,
  /// Sólo lo usa la ruta de emergencia; nunca se siembra.
  Emergency,
}

impl TaskType {
  pub fn tag(&self) -> &'static str {
    match self {
      TaskType::Collection => "COLLECTION",
      TaskType::Survey => "SURVEY",
      TaskType::Art => "ART",
      TaskType::Magazine => "MAGAZINE",
      TaskType::Mural => "MURAL",
      TaskType::Script => "SCRIPT",
      TaskType::Program => "PROGRAM",
      TaskType::Certificates => "CERTIFICATES",
      TaskType::Videos => "VIDEOS",
      TaskType::Emergency => "EMERGENCY",
    }
  }

  /// Departamento cuyo especialista recibe la tarea al sembrar.
  pub fn department(&self) -> &'static str {
    match self {
      TaskType::Collection => "Collector",
      TaskType::Survey | TaskType::Script => "Marketing",
      TaskType::Art | TaskType::Magazine | TaskType::Mural | TaskType::Program => "Art",
      TaskType::Certificates | TaskType::Emergency => "Production",
      TaskType::Videos => "Video",
    }
  }

  /// Tipo de servicio de los casos creados junto al sembrado.
  pub fn service_type(&self) -> ServiceType {
    match self {
      TaskType::Art | TaskType::Magazine | TaskType::Mural | TaskType::Program => ServiceType::Design,
      _ => ServiceType::Photography,
    }
  }

  pub fn all() -> [TaskType; 10] {
    [TaskType::Collection,
     TaskType::Survey,
     TaskType::Art,
     TaskType::Magazine,
     TaskType::Mural,
     TaskType::Script,
     TaskType::Program,
     TaskType::Certificates,
     TaskType::Videos,
     TaskType::Emergency]
  }
}

impl fmt::Display for TaskType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

impl FromStr for TaskType {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_uppercase();
    TaskType::all().into_iter()
                   .find(|t| t.tag() == wanted)
                   .ok_or_else(|| DomainError::ValidationError(format!("tipo de tarea desconocido: {}", s)))
  }
}

/// Entrada del historial (sólo se añade, nunca se reescribe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub at: DateTime<Utc>,
  pub author: String,
  pub action: String,
  pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub id: Uuid,
  pub center: String,
  pub description: String,
  pub responsible: Option<String>,
  pub status: TaskStatus,
  pub assigned_at: Option<DateTime<Utc>>,
  pub concluded_at: Option<DateTime<Utc>>,
  pub area: String,
  history: Vec<HistoryEntry>,
  pub milestone: bool,
  pub phase_id: u8,
  pub task_type: TaskType,
  /// Usuario que originó la tarea, si no la creó el sembrado.
  pub created_by: Option<i64>,
}

impl Task {
  /// Hito latente recién sembrado, con su única entrada `SEED`.
  pub fn standby(center: &str,
                 phase_id: u8,
                 task_type: TaskType,
                 description: &str,
                 responsible: Option<String>,
                 at: DateTime<Utc>)
                 -> Self {
    let mut task = Self { id: Uuid::new_v4(),
                          center: center.to_string(),
                          description: description.to_string(),
                          responsible,
                          status: TaskStatus::Standby,
                          assigned_at: None,
                          concluded_at: None,
                          area: task_type.department().to_string(),
                          history: Vec::new(),
                          milestone: true,
                          phase_id,
                          task_type,
                          created_by: None };
    task.record(at, SYSTEM_AUTHOR, "SEED", "milestone created, standby");
    task
  }

  /// Tarea suelta de emergencia, ya activa, en el área de producción.
  pub fn emergency(center: &str,
                   phase_id: u8,
                   description: &str,
                   responsible: Option<String>,
                   created_by: i64,
                   at: DateTime<Utc>)
                   -> Self {
    let mut task = Self { id: Uuid::new_v4(),
                          center: center.to_string(),
                          description: description.to_string(),
                          responsible,
                          status: TaskStatus::Pendiente,
                          assigned_at: Some(at),
                          concluded_at: None,
                          area: "Produccion".to_string(),
                          history: Vec::new(),
                          milestone: false,
                          phase_id,
                          task_type: TaskType::Emergency,
                          created_by: Some(created_by) };
    task.record(at, SYSTEM_AUTHOR, "EMERGENCY", description);
    task
  }

  pub fn history(&self) -> &[HistoryEntry] {
    &self.history
  }

  pub fn record(&mut self, at: DateTime<Utc>, author: &str, action: &str, note: &str) {
    self.history.push(HistoryEntry { at,
                                     author: author.to_string(),
                                     action: action.to_string(),
                                     note: note.to_string() });
  }

  pub fn is_standby(&self) -> bool {
    self.status == TaskStatus::Standby
  }

  /// Saca la tarea de STANDBY. Es la única transición de salida de ese
  /// estado y sólo ocurre una vez.
  pub fn wake(&mut self, responsible: Option<String>, title: &str, at: DateTime<Utc>) -> Result<(), DomainError> {
    if !self.is_standby() {
      return Err(DomainError::ValidationError(format!("La tarea {} ya está activa ({})", self.id, self.status)));
    }
    self.status = TaskStatus::Pendiente;
    self.assigned_at = Some(at);
    if responsible.is_some() {
      self.responsible = responsible;
    }
    self.record(at, SYSTEM_AUTHOR, "ACTIVATION", &format!("Activated: {}", title));
    Ok(())
  }

  /// Cambio de estado entre estados activos. Nada vuelve a STANDBY y una
  /// tarea latente sólo sale de ahí con `wake`.
  pub fn change_status(&mut self,
                       status: TaskStatus,
                       author: &str,
                       note: &str,
                       at: DateTime<Utc>)
                       -> Result<(), DomainError> {
    if status == TaskStatus::Standby {
      return Err(DomainError::ValidationError("Una tarea no puede volver a STANDBY".to_string()));
    }
    if self.is_standby() {
      return Err(DomainError::ValidationError(format!("La tarea {} sigue en STANDBY; debe activarse primero", self.id)));
    }
    if status == TaskStatus::Concluido {
      self.concluded_at = Some(at);
    }
    let previous = self.status;
    self.status = status;
    self.record(at, author, "STATUS", &format!("{} -> {}: {}", previous, status, note));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn seeded() -> Task {
    Task::standby("Lincoln School", 5, TaskType::Art, "Design: Graduation", None, Utc::now())
  }

  #[test]
  fn seeded_task_has_single_seed_entry() {
    let t = seeded();
    assert_eq!(t.status, TaskStatus::Standby);
    assert_eq!(t.area, "Art");
    assert_eq!(t.history().len(), 1);
    assert_eq!(t.history()[0].author, SYSTEM_AUTHOR);
    assert_eq!(t.history()[0].action, "SEED");
    assert_eq!(t.history()[0].note, "milestone created, standby");
  }

  #[test]
  fn wake_is_one_way() {
    let mut t = seeded();
    t.wake(Some("sofia".into()), "Design: Graduation artwork", Utc::now()).unwrap();
    assert_eq!(t.status, TaskStatus::Pendiente);
    assert!(t.assigned_at.is_some());
    assert_eq!(t.history().last().unwrap().note, "Activated: Design: Graduation artwork");
    assert!(t.wake(None, "again", Utc::now()).is_err());
    assert_eq!(t.history().len(), 2);
  }

  #[test]
  fn wake_without_party_keeps_previous_responsible() {
    let mut t = Task::standby("X", 1, TaskType::Survey, "Survey", Some("marta".into()), Utc::now());
    t.wake(None, "Surveys: Data Management", Utc::now()).unwrap();
    assert_eq!(t.responsible.as_deref(), Some("marta"));
  }

  #[test]
  fn conclusion_sets_timestamp_and_standby_is_final_only_once() {
    let mut t = seeded();
    assert!(t.change_status(TaskStatus::Iniciado, "ana", "", Utc::now()).is_err());
    t.wake(None, "x", Utc::now()).unwrap();
    t.change_status(TaskStatus::Concluido, "ana", "entregado", Utc::now()).unwrap();
    assert!(t.concluded_at.is_some());
    assert!(t.change_status(TaskStatus::Standby, "ana", "", Utc::now()).is_err());
    assert_eq!(t.history().last().unwrap().action, "STATUS");
  }

  #[test]
  fn status_and_type_parse_from_storage_names() {
    assert_eq!("fuera de oficina".parse::<TaskStatus>().unwrap(), TaskStatus::FueraDeOficina);
    assert_eq!("mural".parse::<TaskType>().unwrap(), TaskType::Mural);
    assert!("retouch".parse::<TaskType>().is_err());
    assert_eq!(serde_json::to_string(&TaskStatus::PorAsignar).unwrap(), "\"Por Asignar\"");
  }
}
