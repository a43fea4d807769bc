// Archivo: service.rs
// Propósito: `AgencyService`, la capa orquestadora que expone las
// peticiones de alto nivel (registrar centro, activar fase, mover estados de
// tareas y casos). Debe ser invocada desde handlers o desde la CLI.
use crate::config::WorkflowConfig;
use crate::engine::{ActivationEngine, ActivationOutcome};
use crate::errors::WorkflowError;
use crate::seeding::TaskSeeder;
use chrono::Utc;
use hitos_domain::{Case, CaseStatus, Center, Task, TaskStatus, TaskType};
use hitos_store::{AgencyStore, RegistrationBatch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Petición `SeedCenter`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCenterRequest {
    pub name: String,
    pub center_type: String,
    pub advisor: Option<String>,
    pub parent_staff: Option<String>,
    pub aunt_uncle_staff: Option<String>,
}

/// Petición `ActivatePhase`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivatePhaseRequest {
    pub center_name: String,
    pub phase_key: String,
    pub user_id: i64,
}

/// Servicio de alto nivel sobre centros, hitos y casos.
///
/// Orquesta el almacén y el motor de activación; el motor se construye
/// internamente y se reusa.
pub struct AgencyService<S>
    where S: AgencyStore
{
    store: Arc<S>,
    engine: ActivationEngine<S>,
}

impl<S> AgencyService<S> where S: AgencyStore
{
    pub fn new(store: Arc<S>, config: WorkflowConfig) -> Self {
        let engine = ActivationEngine::new(store.clone(), config);
        Self { store, engine }
    }

    pub fn config(&self) -> &WorkflowConfig {
        self.engine.config()
    }

    /// Registra un centro y siembra todos sus hitos latentes en una única
    /// escritura. `Conflict` si ya existe un centro con el mismo nombre (sin
    /// distinguir mayúsculas); en ese caso no queda nada escrito.
    pub fn register_center(&self, req: SeedCenterRequest) -> Result<Center, WorkflowError> {
        let center = Center::new(&req.name, &req.center_type)?.with_roles(req.advisor,
                                                                           req.parent_staff,
                                                                           req.aunt_uncle_staff);
        let roster = self.store.list_all()?;
        let tasks = TaskSeeder::seed_center(&center, &roster);

        let cases = if self.config().seed_cases {
            let now = Utc::now();
            tasks.iter()
                 .map(|task| {
                     Case::new(task.id,
                               task.task_type.service_type(),
                               &task.description,
                               task.responsible.clone(),
                               now)
                 })
                 .collect()
        } else {
            Vec::new()
        };

        self.store
            .commit_registration(&RegistrationBatch { center: center.clone(), tasks, cases })?;
        Ok(center)
    }

    pub fn activate_phase(&self, req: &ActivatePhaseRequest) -> Result<ActivationOutcome, WorkflowError> {
        self.engine.activate_phase(&req.center_name, &req.phase_key, req.user_id)
    }

    pub fn activate_task_type(&self,
                              req: &ActivatePhaseRequest,
                              task_type: TaskType)
                              -> Result<ActivationOutcome, WorkflowError> {
        self.engine.activate_task_type(&req.center_name, &req.phase_key, task_type, req.user_id)
    }

    pub fn set_center_visibility(&self, name: &str, visible: bool) -> Result<Center, WorkflowError> {
        let mut center = self.center(name)?;
        center.visible = visible;
        self.store.save_center(&center)?;
        Ok(center)
    }

    /// Cambia los contactos "padre" y "tío/tía" del centro. No reasigna
    /// tareas ya sembradas.
    pub fn update_center_roles(&self,
                               name: &str,
                               parent_staff: Option<String>,
                               aunt_uncle_staff: Option<String>)
                               -> Result<Center, WorkflowError> {
        let current = self.center(name)?;
        let advisor = current.advisor.clone();
        let center = current.with_roles(advisor, parent_staff, aunt_uncle_staff);
        self.store.save_center(&center)?;
        Ok(center)
    }

    /// Cambia el nombre del centro; sus tareas pasan al nombre nuevo en la
    /// misma escritura. `Conflict` si otro centro ya usa ese nombre.
    pub fn rename_center(&self, name: &str, new_name: &str) -> Result<Center, WorkflowError> {
        let mut center = self.center(name)?;
        center.rename(new_name)?;
        self.store.rename_center(name, &center)?;
        Ok(center)
    }

    pub fn list_centers(&self) -> Result<Vec<Center>, WorkflowError> {
        Ok(self.store.list_centers()?)
    }

    pub fn center(&self, name: &str) -> Result<Center, WorkflowError> {
        self.store
            .find_by_name(name)?
            .ok_or_else(|| WorkflowError::NotFound(format!("centro '{}'", name)))
    }

    pub fn tasks_for_center(&self, name: &str) -> Result<Vec<Task>, WorkflowError> {
        Ok(self.store.list_by_center(name)?)
    }

    pub fn update_task_status(&self,
                              task_id: &Uuid,
                              status: TaskStatus,
                              author: &str,
                              note: &str)
                              -> Result<Task, WorkflowError> {
        let mut task = self.store
                           .find_task(task_id)?
                           .ok_or_else(|| WorkflowError::NotFound(format!("tarea {}", task_id)))?;
        task.change_status(status, author, note, Utc::now())?;
        self.store.save_task(&task)?;
        Ok(task)
    }

    /// Aplica un cambio de estado por id numérico (1..4) y sus reglas de
    /// tiempos.
    pub fn update_case_status(&self, case_id: &Uuid, status_id: i32) -> Result<Case, WorkflowError> {
        let status = CaseStatus::try_from(status_id)?;
        let mut case = self.case(case_id)?;
        case.apply_status_change(status);
        self.store.save_case(&case)?;
        Ok(case)
    }

    /// Traspasa el caso a otro miembro del staff sin tocar la tarea.
    pub fn reassign_case(&self, case_id: &Uuid, username: &str) -> Result<Case, WorkflowError> {
        let member = self.store
                         .find_by_username(username)?
                         .ok_or_else(|| WorkflowError::NotFound(format!("usuario '{}'", username)))?;
        let mut case = self.case(case_id)?;
        case.responsible = Some(member.username);
        self.store.save_case(&case)?;
        Ok(case)
    }

    pub fn case_for_task(&self, task_id: &Uuid) -> Result<Option<Case>, WorkflowError> {
        Ok(self.store.find_by_task(task_id)?)
    }

    fn case(&self, case_id: &Uuid) -> Result<Case, WorkflowError> {
        self.store
            .find_case(case_id)?
            .ok_or_else(|| WorkflowError::NotFound(format!("caso {}", case_id)))
    }
}
