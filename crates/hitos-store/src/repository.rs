// Archivo: repository.rs
// Propósito: definir los traits de los colaboradores que consume el motor
// (directorio de staff, centros, tareas y casos) y los contratos de commit
// atómico de una activación, un alta y un renombrado.
use crate::errors::Result;
use hitos_domain::{find_specialist, Case, Center, StaffMember, Task, TaskStatus};
use uuid::Uuid;

/// Directorio de staff consultable por departamento, username o id.
pub trait StaffDirectory: Send + Sync {
    /// Roster completo, en el orden estable del almacenamiento.
    fn list_all(&self) -> Result<Vec<StaffMember>>;

    fn find_by_username(&self, username: &str) -> Result<Option<StaffMember>>;

    /// Busca por id numérico de usuario (el `userId` de las peticiones).
    fn find_by_id(&self, id: i64) -> Result<Option<StaffMember>>;

    /// Primer especialista del departamento según el orden de `list_all`.
    fn find_by_department(&self, label: &str) -> Result<Option<StaffMember>> {
        let roster = self.list_all()?;
        Ok(find_specialist(&roster, label).cloned())
    }
}

/// Almacén de centros. La identidad es el nombre exacto.
pub trait CenterStore: Send + Sync {
    fn find_by_name(&self, name: &str) -> Result<Option<Center>>;

    /// Reemplaza un centro existente; `NotFound` si no existe.
    fn save_center(&self, center: &Center) -> Result<()>;

    fn list_centers(&self) -> Result<Vec<Center>>;
}

/// Almacén de tareas (pendientes/hitos).
pub trait TaskStore: Send + Sync {
    /// Tareas de un centro en una fase y estado dados, en orden de inserción.
    fn find_by_center_phase_status(&self, center: &str, phase_id: u8, status: TaskStatus) -> Result<Vec<Task>>;

    fn find_task(&self, id: &Uuid) -> Result<Option<Task>>;

    fn list_by_center(&self, center: &str) -> Result<Vec<Task>>;

    /// Inserta o reemplaza una tarea.
    fn save_task(&self, task: &Task) -> Result<()>;
}

/// Almacén de casos.
pub trait CaseStore: Send + Sync {
    /// Caso adjunto a una tarea; si hubiera varios, el primero creado.
    fn find_by_task(&self, task_id: &Uuid) -> Result<Option<Case>>;

    fn find_case(&self, id: &Uuid) -> Result<Option<Case>>;

    /// Reemplaza un caso existente; `NotFound` si no existe.
    fn save_case(&self, case: &Case) -> Result<()>;
}

/// Escrituras de una activación que deben aplicarse juntas.
#[derive(Debug, Clone, Default)]
pub struct ActivationBatch {
    /// Tareas que salen de STANDBY (ya mutadas).
    pub woken: Vec<Task>,
    /// Tareas nuevas (p. ej. la tarea de emergencia).
    pub created: Vec<Task>,
    /// Casos a insertar o reemplazar.
    pub cases: Vec<Case>,
    /// Sólo en lotes de emergencia; ver `EmergencyGuard`.
    pub emergency_guard: Option<EmergencyGuard>,
}

/// Número de tareas de emergencia que la activación vio para su
/// (centro, fase) antes de decidir crear otra. Con escritura condicional el
/// lote se rechaza si el número cambió, así dos llamadas concurrentes no
/// crean dos emergencias para la misma lectura.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyGuard {
    pub center: String,
    pub phase_id: u8,
    pub seen: usize,
}

/// Alta de un centro con sus tareas sembradas y, opcionalmente, sus casos.
#[derive(Debug, Clone)]
pub struct RegistrationBatch {
    pub center: Center,
    pub tasks: Vec<Task>,
    pub cases: Vec<Case>,
}

impl ActivationBatch {
    pub fn is_empty(&self) -> bool {
        self.woken.is_empty() && self.created.is_empty() && self.cases.is_empty()
    }
}

/// Almacén completo que necesita el motor.
pub trait AgencyStore: StaffDirectory + CenterStore + TaskStore + CaseStore {
    /// Aplica el lote completo o nada.
    ///
    /// Con `require_standby`, cada tarea de `woken` debe seguir en STANDBY en
    /// el almacenamiento al momento de escribir; si alguna no lo está se
    /// devuelve `Conflict` y no se escribe ningún registro. También se
    /// comprueba `emergency_guard`, si lo hay.
    fn commit_activation(&self, batch: &ActivationBatch, require_standby: bool) -> Result<()>;

    /// Alta atómica: `Conflict` si ya existe un centro con el mismo nombre
    /// ignorando mayúsculas (o un id repetido), y en ese caso no se escribe
    /// nada.
    fn commit_registration(&self, batch: &RegistrationBatch) -> Result<()>;

    /// Sustituye el centro `old_name` por `renamed` y reescribe
    /// `Task::center` de todas sus tareas en la misma operación. `NotFound`
    /// si `old_name` no existe, `Conflict` si el nuevo nombre choca con otro
    /// centro.
    fn rename_center(&self, old_name: &str, renamed: &Center) -> Result<()>;
}
