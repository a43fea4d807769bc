// activation.rs
//
// Motor de activación: despierta las tareas latentes de una fase, asigna
// responsables, sincroniza los casos y aplica todo en un único lote.
use super::classify::{classify, Candidates, Wake};
use crate::config::{ExhaustedPolicy, WorkflowConfig};
use crate::errors::WorkflowError;
use chrono::{DateTime, Utc};
use hitos_domain::{is_design_key, Case, Center, PhaseDefinition, PhaseMatrix, ResolutionChain, Task, TaskStatus,
                   TaskType};
use hitos_store::{ActivationBatch, AgencyStore, EmergencyGuard, StoreError};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Resultado de una petición de activación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivationOutcome {
  Activated { count: usize, task_ids: Vec<Uuid> },
  /// Ninguna tarea despertó y se creó una tarea con caso de emergencia.
  Emergency { task_id: Uuid, case_id: Uuid },
  /// Ninguna tarea despertó y la política es `NoOp`.
  Skipped,
}

impl ActivationOutcome {
  pub fn activated_count(&self) -> usize {
    match self {
      ActivationOutcome::Activated { count, .. } => *count,
      _ => 0,
    }
  }
}

/// Quién dispara la activación y cuántas emergencias había para la fase
/// cuando se leyó.
#[derive(Debug, Clone, Copy)]
struct Trigger {
  user: i64,
  emergencies_seen: usize,
}

/// Motor de activación por fase.
///
/// Cada llamada es síncrona: lee las tareas STANDBY, construye el lote de
/// escrituras en memoria y lo entrega a `AgencyStore::commit_activation`.
/// Con `conditional_activation` un lote cuyas tareas ya no estén en STANDBY
/// se rechaza entero con `WorkflowError::Conflict`.
pub struct ActivationEngine<S>
  where S: AgencyStore
{
  store: Arc<S>,
  config: WorkflowConfig,
}

impl<S> ActivationEngine<S> where S: AgencyStore
{
  pub fn new(store: Arc<S>, config: WorkflowConfig) -> Self {
    Self { store, config }
  }

  pub fn config(&self) -> &WorkflowConfig {
    &self.config
  }

  pub fn activate_phase(&self,
                        center_name: &str,
                        phase_key: &str,
                        triggering_user: i64)
                        -> Result<ActivationOutcome, WorkflowError> {
    self.activate_phase_at(center_name, phase_key, triggering_user, Utc::now())
  }

  /// Activa las tareas de una fase según el tipo de tarea y la pista de la
  /// clave (arte/diseño o general).
  pub fn activate_phase_at(&self,
                           center_name: &str,
                           phase_key: &str,
                           triggering_user: i64,
                           at: DateTime<Utc>)
                           -> Result<ActivationOutcome, WorkflowError> {
    let phase = PhaseMatrix::resolve(phase_key)?;
    let center = self.load_center(center_name)?;
    let roster = self.store.list_all()?;
    let candidates = Candidates::resolve(&center, &roster);
    let design_key = is_design_key(phase_key);
    let trigger = Trigger { user: triggering_user,
                            emergencies_seen: self.emergencies_seen(&center.name, phase.phase_id)? };

    let dormant = self.store
                      .find_by_center_phase_status(&center.name, phase.phase_id, TaskStatus::Standby)?;
    log::debug!("activacion {} en '{}': {} tareas en STANDBY", phase.key, center.name, dormant.len());

    let woken: Vec<(Task, Wake)> = dormant.into_iter()
                                          .filter_map(|t| classify(&t, phase, design_key, &candidates).map(|w| (t, w)))
                                          .collect();
    self.commit_wakes(&center, phase, woken, candidates.parent.clone(), trigger, at)
  }

  pub fn activate_task_type(&self,
                            center_name: &str,
                            phase_key: &str,
                            task_type: TaskType,
                            triggering_user: i64)
                            -> Result<ActivationOutcome, WorkflowError> {
    self.activate_task_type_at(center_name, phase_key, task_type, triggering_user, Utc::now())
  }

  /// Despierta las tareas STANDBY de un tipo concreto, para los tipos que la
  /// activación por fase deja intactos (revista, mural, guion, diplomas...).
  /// Responsable: el sembrado, si no el especialista del departamento, si no
  /// el padre del centro. Título: la descripción de la propia tarea.
  pub fn activate_task_type_at(&self,
                               center_name: &str,
                               phase_key: &str,
                               task_type: TaskType,
                               triggering_user: i64,
                               at: DateTime<Utc>)
                               -> Result<ActivationOutcome, WorkflowError> {
    if task_type == TaskType::Emergency {
      return Err(WorkflowError::Validation("las tareas de emergencia no se siembran ni se activan".to_string()));
    }
    let phase = PhaseMatrix::resolve(phase_key)?;
    let center = self.load_center(center_name)?;
    let roster = self.store.list_all()?;
    let specialist = ResolutionChain::new().specialist(task_type.department())
                                           .resolve(&roster)
                                           .map(|m| m.username.clone());
    let trigger = Trigger { user: triggering_user,
                            emergencies_seen: self.emergencies_seen(&center.name, phase.phase_id)? };

    let woken: Vec<(Task, Wake)> =
      self.store
          .find_by_center_phase_status(&center.name, phase.phase_id, TaskStatus::Standby)?
          .into_iter()
          .filter(|t| t.task_type == task_type)
          .map(|t| {
            let wake = Wake { title: t.description.clone(),
                              responsible: t.responsible.clone().or_else(|| specialist.clone()) };
            (t, wake)
          })
          .collect();
    let parent = Candidates::parent_chain(&center).resolve(&roster).map(|m| m.username.clone());
    self.commit_wakes(&center, phase, woken, parent, trigger, at)
  }

  fn load_center(&self, name: &str) -> Result<Center, WorkflowError> {
    self.store
        .find_by_name(name)?
        .ok_or_else(|| WorkflowError::NotFound(format!("centro '{}'", name)))
  }

  /// Tareas de emergencia ya creadas para la fase. Se lee antes que las
  /// tareas STANDBY para que el lote de emergencia pueda validarse.
  fn emergencies_seen(&self, center_name: &str, phase_id: u8) -> Result<usize, WorkflowError> {
    Ok(self.store
           .list_by_center(center_name)?
           .iter()
           .filter(|t| t.phase_id == phase_id && t.task_type == TaskType::Emergency)
           .count())
  }

  fn commit_wakes(&self,
                  center: &Center,
                  phase: &PhaseDefinition,
                  woken: Vec<(Task, Wake)>,
                  parent: Option<String>,
                  trigger: Trigger,
                  at: DateTime<Utc>)
                  -> Result<ActivationOutcome, WorkflowError> {
    if woken.is_empty() {
      return self.on_exhausted(center, phase, trigger, at);
    }

    let mut batch = ActivationBatch::default();
    for (mut task, wake) in woken {
      let responsible = wake.responsible.or_else(|| parent.clone());
      task.wake(responsible, &wake.title, at)?;
      batch.cases.push(self.sync_case(&task, phase, &wake.title, at)?);
      log::info!("tarea {} ({}) activada: {} -> {}",
                 task.id,
                 task.task_type,
                 wake.title,
                 task.responsible.as_deref().unwrap_or("-"));
      batch.woken.push(task);
    }

    self.commit(&batch)?;
    let task_ids: Vec<Uuid> = batch.woken.iter().map(|t| t.id).collect();
    Ok(ActivationOutcome::Activated { count: task_ids.len(), task_ids })
  }

  /// Caso existente con la nueva descripción, o uno nuevo adjunto a la tarea.
  fn sync_case(&self, task: &Task, phase: &PhaseDefinition, title: &str, at: DateTime<Utc>) -> Result<Case, WorkflowError> {
    match self.store.find_by_task(&task.id)? {
      Some(mut case) => {
        case.description = title.to_string();
        Ok(case)
      }
      None => Ok(Case::new(task.id, phase.service_type, title, task.responsible.clone(), at)),
    }
  }

  fn on_exhausted(&self,
                  center: &Center,
                  phase: &PhaseDefinition,
                  trigger: Trigger,
                  at: DateTime<Utc>)
                  -> Result<ActivationOutcome, WorkflowError> {
    match self.config.exhausted_policy {
      ExhaustedPolicy::NoOp => {
        log::info!("sin tareas en STANDBY para {} en '{}'; se omite", phase.key, center.name);
        Ok(ActivationOutcome::Skipped)
      }
      ExhaustedPolicy::Error => {
        Err(WorkflowError::Conflict(format!("no quedan tareas en STANDBY para {} en '{}'", phase.key, center.name)))
      }
      ExhaustedPolicy::Emergency => self.create_emergency(center, phase, trigger, at),
    }
  }

  /// Red de seguridad: tarea suelta en Produccion del usuario que disparó la
  /// activación, con un único caso de emergencia. Con escritura condicional
  /// sólo una de varias llamadas concurrentes con la misma lectura la crea.
  fn create_emergency(&self,
                      center: &Center,
                      phase: &PhaseDefinition,
                      trigger: Trigger,
                      at: DateTime<Utc>)
                      -> Result<ActivationOutcome, WorkflowError> {
    let Trigger { user: triggering_user, emergencies_seen } = trigger;
    let owner = self.store.find_by_id(triggering_user)?;
    if owner.is_none() {
      log::warn!("usuario {} no está en el directorio; la tarea de emergencia queda sin responsable",
                 triggering_user);
    }
    let description = format!("Emergency: {}", phase.description);
    let responsible = owner.map(|m| m.username);
    let task = Task::emergency(&center.name, phase.phase_id, &description, responsible.clone(), triggering_user, at);
    let case = Case::new(task.id, phase.service_type, &description, responsible, at);
    let outcome = ActivationOutcome::Emergency { task_id: task.id, case_id: case.id };

    let guard = EmergencyGuard { center: center.name.clone(), phase_id: phase.phase_id, seen: emergencies_seen };
    let batch = ActivationBatch { created: vec![task],
                                  cases: vec![case],
                                  emergency_guard: Some(guard),
                                  ..Default::default() };
    self.commit(&batch)?;
    log::warn!("ninguna tarea despertó para {} en '{}'; caso de emergencia creado", phase.key, center.name);
    Ok(outcome)
  }

  fn commit(&self, batch: &ActivationBatch) -> Result<(), WorkflowError> {
    self.store
        .commit_activation(batch, self.config.conditional_activation)
        .map_err(|e| {
          if let StoreError::Conflict(m) = &e {
            log::warn!("activacion rechazada por escritura condicional: {}", m);
          }
          WorkflowError::from(e)
        })
  }
}
