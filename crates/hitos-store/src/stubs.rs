// Archivo: stubs.rs
// Propósito: implementación en memoria de todos los almacenes.
//
// No es durable; se usa en pruebas y en el binario de demostración. El orden
// de inserción se conserva (`IndexMap`) para que las consultas sean
// deterministas.
use crate::errors::{Result, StoreError};
use crate::repository::{ActivationBatch, AgencyStore, CaseStore, CenterStore, RegistrationBatch, StaffDirectory,
                        TaskStore};
use hitos_domain::{Case, Center, StaffMember, Task, TaskStatus, TaskType};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

pub struct InMemoryAgencyStore {
    staff: Arc<Mutex<Vec<StaffMember>>>,
    /// Centros indexados por nombre exacto.
    centers: Arc<Mutex<IndexMap<String, Center>>>,
    tasks: Arc<Mutex<IndexMap<Uuid, Task>>>,
    cases: Arc<Mutex<IndexMap<Uuid, Case>>>,
}

impl InMemoryAgencyStore {
    pub fn new() -> Self {
        Self::with_staff(Vec::new())
    }

    pub fn with_staff(roster: Vec<StaffMember>) -> Self {
        Self { staff: Arc::new(Mutex::new(roster)),
               centers: Arc::new(Mutex::new(IndexMap::new())),
               tasks: Arc::new(Mutex::new(IndexMap::new())),
               cases: Arc::new(Mutex::new(IndexMap::new())) }
    }

    pub fn list_cases(&self) -> Result<Vec<Case>> {
        Ok(self.lock(&self.cases, "cases")?.values().cloned().collect())
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `StoreError::Storage`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>, name: &str) -> std::result::Result<MutexGuard<'a, T>, StoreError> {
        m.lock().map_err(|e| StoreError::Storage(format!("mutex '{}' poisoned: {}", name, e)))
    }
}

impl Default for InMemoryAgencyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffDirectory for InMemoryAgencyStore {
    fn list_all(&self) -> Result<Vec<StaffMember>> {
        Ok(self.lock(&self.staff, "staff")?.clone())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>> {
        let staff = self.lock(&self.staff, "staff")?;
        Ok(staff.iter().find(|m| m.username == username).cloned())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<StaffMember>> {
        let staff = self.lock(&self.staff, "staff")?;
        Ok(staff.iter().find(|m| m.id == id).cloned())
    }
}

impl CenterStore for InMemoryAgencyStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Center>> {
        Ok(self.lock(&self.centers, "centers")?.get(name).cloned())
    }

    fn save_center(&self, center: &Center) -> Result<()> {
        let mut centers = self.lock(&self.centers, "centers")?;
        match centers.get_mut(&center.name) {
            Some(slot) => {
                *slot = center.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("centro {}", center.name))),
        }
    }

    fn list_centers(&self) -> Result<Vec<Center>> {
        Ok(self.lock(&self.centers, "centers")?.values().cloned().collect())
    }
}

impl TaskStore for InMemoryAgencyStore {
    fn find_by_center_phase_status(&self, center: &str, phase_id: u8, status: TaskStatus) -> Result<Vec<Task>> {
        let tasks = self.lock(&self.tasks, "tasks")?;
        Ok(tasks.values()
                .filter(|t| t.center == center && t.phase_id == phase_id && t.status == status)
                .cloned()
                .collect())
    }

    fn find_task(&self, id: &Uuid) -> Result<Option<Task>> {
        Ok(self.lock(&self.tasks, "tasks")?.get(id).cloned())
    }

    fn list_by_center(&self, center: &str) -> Result<Vec<Task>> {
        let tasks = self.lock(&self.tasks, "tasks")?;
        Ok(tasks.values().filter(|t| t.center == center).cloned().collect())
    }

    fn save_task(&self, task: &Task) -> Result<()> {
        self.lock(&self.tasks, "tasks")?.insert(task.id, task.clone());
        Ok(())
    }
}

impl CaseStore for InMemoryAgencyStore {
    fn find_by_task(&self, task_id: &Uuid) -> Result<Option<Case>> {
        let cases = self.lock(&self.cases, "cases")?;
        Ok(cases.values().find(|c| &c.task_id == task_id).cloned())
    }

    fn find_case(&self, id: &Uuid) -> Result<Option<Case>> {
        Ok(self.lock(&self.cases, "cases")?.get(id).cloned())
    }

    fn save_case(&self, case: &Case) -> Result<()> {
        let mut cases = self.lock(&self.cases, "cases")?;
        match cases.get_mut(&case.id) {
            Some(slot) => {
                *slot = case.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("caso {}", case.id))),
        }
    }
}

// Orden de locks en todas las operaciones compuestas: centros, tareas, casos.
impl AgencyStore for InMemoryAgencyStore {
    /// Toma los locks de tareas y casos, valida el lote entero y sólo
    /// entonces escribe, así que un fallo no deja escrituras parciales.
    fn commit_activation(&self, batch: &ActivationBatch, require_standby: bool) -> Result<()> {
        let mut tasks = self.lock(&self.tasks, "tasks")?;
        let mut cases = self.lock(&self.cases, "cases")?;

        for task in &batch.woken {
            let stored = tasks.get(&task.id)
                              .ok_or_else(|| StoreError::NotFound(format!("tarea {}", task.id)))?;
            if require_standby && stored.status != TaskStatus::Standby {
                log::warn!("escritura condicional rechazada: tarea {} está en {}", task.id, stored.status);
                return Err(StoreError::Conflict(format!("la tarea {} ya no está en STANDBY ({})", task.id, stored.status)));
            }
        }
        for task in &batch.created {
            if tasks.contains_key(&task.id) {
                return Err(StoreError::Conflict(format!("tarea {} duplicada", task.id)));
            }
        }
        if let (true, Some(guard)) = (require_standby, &batch.emergency_guard) {
            let current = tasks.values()
                               .filter(|t| {
                                   t.center == guard.center
                                   && t.phase_id == guard.phase_id
                                   && t.task_type == TaskType::Emergency
                               })
                               .count();
            if current != guard.seen {
                log::warn!("escritura condicional rechazada: {} emergencias en fase {} de '{}', se esperaban {}",
                           current,
                           guard.phase_id,
                           guard.center,
                           guard.seen);
                return Err(StoreError::Conflict(format!("otra activación ya creó una emergencia para la fase {} de '{}'",
                                                        guard.phase_id, guard.center)));
            }
        }

        for task in batch.woken.iter().chain(batch.created.iter()) {
            tasks.insert(task.id, task.clone());
        }
        for case in &batch.cases {
            cases.insert(case.id, case.clone());
        }
        Ok(())
    }

    fn commit_registration(&self, batch: &RegistrationBatch) -> Result<()> {
        let mut centers = self.lock(&self.centers, "centers")?;
        let mut tasks = self.lock(&self.tasks, "tasks")?;
        let mut cases = self.lock(&self.cases, "cases")?;

        if let Some(existing) = centers.values().find(|c| c.same_name(&batch.center.name)) {
            return Err(StoreError::Conflict(format!("ya existe el centro '{}'", existing.name)));
        }
        if let Some(t) = batch.tasks.iter().find(|t| tasks.contains_key(&t.id)) {
            return Err(StoreError::Conflict(format!("tarea {} duplicada", t.id)));
        }
        if let Some(c) = batch.cases.iter().find(|c| cases.contains_key(&c.id)) {
            return Err(StoreError::Conflict(format!("caso {} duplicado", c.id)));
        }

        centers.insert(batch.center.name.clone(), batch.center.clone());
        for t in &batch.tasks {
            tasks.insert(t.id, t.clone());
        }
        for c in &batch.cases {
            cases.insert(c.id, c.clone());
        }
        Ok(())
    }

    fn rename_center(&self, old_name: &str, renamed: &Center) -> Result<()> {
        let mut centers = self.lock(&self.centers, "centers")?;
        let mut tasks = self.lock(&self.tasks, "tasks")?;

        let index = centers.get_index_of(old_name)
                           .ok_or_else(|| StoreError::NotFound(format!("centro {}", old_name)))?;
        // un cambio sólo de mayúsculas choca consigo mismo; se permite
        if let Some(other) = centers.values().find(|c| c.name != old_name && c.same_name(&renamed.name)) {
            return Err(StoreError::Conflict(format!("ya existe el centro '{}'", other.name)));
        }

        centers.shift_remove_index(index);
        centers.shift_insert(index, renamed.name.clone(), renamed.clone());
        let mut moved = 0;
        for task in tasks.values_mut().filter(|t| t.center == old_name) {
            task.center = renamed.name.clone();
            moved += 1;
        }
        log::info!("centro '{}' renombrado a '{}' ({} tareas)", old_name, renamed.name, moved);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitos_domain::DomainStubs;
    use std::thread;

    #[test]
    fn mutex_poisoning_returns_error() {
        let store = InMemoryAgencyStore::with_staff(DomainStubs::sample_roster());

        let staff_arc = store.staff.clone();
        let handle = thread::spawn(move || {
            let _g = staff_arc.lock().unwrap();
            panic!("force poison");
        });
        let _ = handle.join();

        match store.list_all() {
            Err(StoreError::Storage(_)) => (),
            other => panic!("expected Storage error, got {:?}", other),
        }
    }

    #[test]
    fn standby_query_keeps_insertion_order() {
        let store = InMemoryAgencyStore::new();
        let now = chrono::Utc::now();
        let a = Task::standby("Lincoln School", 2, TaskType::Collection, "a", None, now);
        let b = Task::standby("Lincoln School", 2, TaskType::Survey, "b", None, now);
        let other = Task::standby("Other", 2, TaskType::Survey, "c", None, now);
        let batch = ActivationBatch { created: vec![a.clone(), other, b.clone()], ..Default::default() };
        store.commit_activation(&batch, true).unwrap();
        let found = store.find_by_center_phase_status("Lincoln School", 2, TaskStatus::Standby).unwrap();
        assert_eq!(found.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    }
}
