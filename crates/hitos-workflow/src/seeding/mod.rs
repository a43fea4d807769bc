//! Sembrado de hitos latentes para un centro recién registrado.
mod schedule;

pub use schedule::{for_phase, ScheduleEntry, SCHEDULE};

use crate::engine::warn_missing_contacts;
use chrono::{DateTime, Utc};
use hitos_domain::{Center, ResolutionChain, StaffMember, Task};

/// Genera las tareas STANDBY de un centro a partir de `SCHEDULE`.
pub struct TaskSeeder;

impl TaskSeeder {
  pub fn seed_center(center: &Center, roster: &[StaffMember]) -> Vec<Task> {
    Self::seed_center_at(center, roster, Utc::now())
  }

  /// Una tarea por fila del calendario. El responsable sale de la cadena
  /// especialista del departamento -> padre del centro -> ninguno.
  pub fn seed_center_at(center: &Center, roster: &[StaffMember], at: DateTime<Utc>) -> Vec<Task> {
    warn_missing_contacts(center, roster);
    let tasks: Vec<Task> = SCHEDULE.iter()
                                   .map(|row| {
                                     let responsible = Self::chain_for(row, center).resolve(roster)
                                                                                   .map(|m| m.username.clone());
                                     Task::standby(&center.name,
                                                   row.phase_id,
                                                   row.task_type,
                                                   row.description,
                                                   responsible,
                                                   at)
                                   })
                                   .collect();
    let unassigned = tasks.iter().filter(|t| t.responsible.is_none()).count();
    log::info!("centro '{}': {} hitos sembrados ({} sin responsable)",
               center.name,
               tasks.len(),
               unassigned);
    tasks
  }

  pub fn chain_for(row: &ScheduleEntry, center: &Center) -> ResolutionChain {
    ResolutionChain::new().specialist(row.task_type.department())
                          .username(center.parent_staff.as_deref())
  }
}
