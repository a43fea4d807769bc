// case.rs
use crate::{DomainError, ServiceType};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Estado de un caso; el id numérico es el que usan los clientes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
  Pending = 1,
  InProgress = 2,
  Completed = 3,
  Stopped = 4,
}

impl CaseStatus {
  pub fn id(&self) -> i32 {
    *self as i32
  }
}

impl TryFrom<i32> for CaseStatus {
  type Error = DomainError;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(CaseStatus::Pending),
      2 => Ok(CaseStatus::InProgress),
      3 => Ok(CaseStatus::Completed),
      4 => Ok(CaseStatus::Stopped),
      other => Err(DomainError::ValidationError(format!("estado de caso inválido: {}", other))),
    }
  }
}

impl fmt::Display for CaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}({})", self, self.id())
  }
}

/// Caso: sub-unidad rastreable de una tarea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub id: Uuid,
  pub task_id: Uuid,
  pub description: String,
  pub service_type: ServiceType,
  pub evidence: Vec<String>,
  pub comment: Option<String>,
  pub started_at: Option<DateTime<Utc>>,
  pub ended_at: Option<DateTime<Utc>>,
  pub status: CaseStatus,
  /// Independiente del responsable de la tarea (permite traspasos).
  pub responsible: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Case {
  pub fn new(task_id: Uuid,
             service_type: ServiceType,
             description: &str,
             responsible: Option<String>,
             at: DateTime<Utc>)
             -> Self {
    Self { id: Uuid::new_v4(),
           task_id,
           description: description.to_string(),
           service_type,
           evidence: Vec::new(),
           comment: None,
           started_at: None,
           ended_at: None,
           status: CaseStatus::Pending,
           responsible,
           created_at: at }
  }

  pub fn apply_status_change(&mut self, status: CaseStatus) {
    self.apply_status_change_at(status, Utc::now())
  }

  /// El inicio se fija sólo la primera vez que el caso pasa a InProgress;
  /// el fin se fija (y se sobrescribe) cada vez que pasa a Completed.
  pub fn apply_status_change_at(&mut self, status: CaseStatus, at: DateTime<Utc>) {
    match status {
      CaseStatus::InProgress if self.started_at.is_none() => self.started_at = Some(at),
      CaseStatus::Completed => self.ended_at = Some(at),
      _ => {}
    }
    self.status = status;
  }

  /// `ended_at - started_at`, sólo cuando ambos existen.
  pub fn elapsed(&self) -> Option<Duration> {
    match (self.started_at, self.ended_at) {
      (Some(start), Some(end)) => Some(end - start),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn t(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, minute, 0).unwrap()
  }

  fn case() -> Case {
    Case::new(Uuid::new_v4(), ServiceType::Photography, "Photography: Launch event", None, t(0))
  }

  #[test]
  fn start_is_kept_from_first_transition() {
    let mut c = case();
    c.apply_status_change_at(CaseStatus::InProgress, t(1));
    c.apply_status_change_at(CaseStatus::Pending, t(2));
    c.apply_status_change_at(CaseStatus::InProgress, t(3));
    c.apply_status_change_at(CaseStatus::Completed, t(4));
    assert_eq!(c.started_at, Some(t(1)));
    assert_eq!(c.ended_at, Some(t(4)));
    assert_eq!(c.elapsed(), Some(Duration::minutes(3)));
    assert_eq!(c.status, CaseStatus::Completed);
  }

  #[test]
  fn recompletion_overwrites_end() {
    let mut c = case();
    c.apply_status_change_at(CaseStatus::Completed, t(5));
    assert!(c.elapsed().is_none());
    c.apply_status_change_at(CaseStatus::InProgress, t(6));
    c.apply_status_change_at(CaseStatus::Completed, t(9));
    assert_eq!(c.ended_at, Some(t(9)));
  }

  #[test]
  fn stopped_and_pending_do_not_touch_timestamps() {
    let mut c = case();
    c.apply_status_change_at(CaseStatus::Stopped, t(1));
    c.apply_status_change_at(CaseStatus::Pending, t(2));
    assert!(c.started_at.is_none());
    assert!(c.ended_at.is_none());
  }

  #[test]
  fn numeric_ids() {
    assert_eq!(CaseStatus::try_from(2).unwrap(), CaseStatus::InProgress);
    assert_eq!(CaseStatus::Stopped.id(), 4);
    assert!(CaseStatus::try_from(0).is_err());
    assert!(CaseStatus::try_from(5).is_err());
  }
}
