// Almacén de prueba que envuelve `InMemoryAgencyStore` y puede retener las
// activaciones concurrentes justo después de leer las tareas STANDBY, para
// que todas lean antes de que ninguna escriba.
use hitos_domain::{Case, Center, StaffMember, Task, TaskStatus};
use hitos_store::{ActivationBatch, AgencyStore, CaseStore, CenterStore, InMemoryAgencyStore, RegistrationBatch, Result,
                  StaffDirectory, TaskStore};
use std::sync::{Arc, Barrier, Mutex};
use uuid::Uuid;

pub struct GatedStore {
  inner: InMemoryAgencyStore,
  gate: Mutex<Option<Arc<Barrier>>>,
}

impl GatedStore {
  pub fn new(roster: Vec<StaffMember>) -> Self {
    Self { inner: InMemoryAgencyStore::with_staff(roster), gate: Mutex::new(None) }
  }

  /// A partir de aquí cada lectura de STANDBY espera a que `parties`
  /// activaciones hayan leído.
  pub fn arm(&self, parties: usize) {
    *self.gate.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
  }
}

impl StaffDirectory for GatedStore {
  fn list_all(&self) -> Result<Vec<StaffMember>> {
    self.inner.list_all()
  }

  fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>> {
    self.inner.find_by_username(username)
  }

  fn find_by_id(&self, id: i64) -> Result<Option<StaffMember>> {
    self.inner.find_by_id(id)
  }
}

impl CenterStore for GatedStore {
  fn find_by_name(&self, name: &str) -> Result<Option<Center>> {
    self.inner.find_by_name(name)
  }

  fn save_center(&self, center: &Center) -> Result<()> {
    self.inner.save_center(center)
  }

  fn list_centers(&self) -> Result<Vec<Center>> {
    self.inner.list_centers()
  }
}

impl TaskStore for GatedStore {
  fn find_by_center_phase_status(&self, center: &str, phase_id: u8, status: TaskStatus) -> Result<Vec<Task>> {
    let found = self.inner.find_by_center_phase_status(center, phase_id, status)?;
    let gate = self.gate.lock().unwrap().clone();
    if let Some(barrier) = gate {
      barrier.wait();
    }
    Ok(found)
  }

  fn find_task(&self, id: &Uuid) -> Result<Option<Task>> {
    self.inner.find_task(id)
  }

  fn list_by_center(&self, center: &str) -> Result<Vec<Task>> {
    self.inner.list_by_center(center)
  }

  fn save_task(&self, task: &Task) -> Result<()> {
    self.inner.save_task(task)
  }
}

impl CaseStore for GatedStore {
  fn find_by_task(&self, task_id: &Uuid) -> Result<Option<Case>> {
    self.inner.find_by_task(task_id)
  }

  fn find_case(&self, id: &Uuid) -> Result<Option<Case>> {
    self.inner.find_case(id)
  }

  fn save_case(&self, case: &Case) -> Result<()> {
    self.inner.save_case(case)
  }
}

impl AgencyStore for GatedStore {
  fn commit_activation(&self, batch: &ActivationBatch, require_standby: bool) -> Result<()> {
    self.inner.commit_activation(batch, require_standby)
  }

  fn commit_registration(&self, batch: &RegistrationBatch) -> Result<()> {
    self.inner.commit_registration(batch)
  }

  fn rename_center(&self, old_name: &str, renamed: &Center) -> Result<()> {
    self.inner.rename_center(old_name, renamed)
  }
}
