// schedule.rs
//
// Calendario declarativo del sembrado: una fila por tarea latente que se crea
// al registrar un centro. La activación depende de que los tipos coincidan
// exactamente con esta tabla.
use hitos_domain::TaskType;

/// Fila del calendario: fase, tipo de tarea y descripción inicial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
  pub phase_id: u8,
  pub task_type: TaskType,
  pub description: &'static str,
}

const fn entry(phase_id: u8, task_type: TaskType, description: &'static str) -> ScheduleEntry {
  ScheduleEntry { phase_id, task_type, description }
}

pub const SCHEDULE: &[ScheduleEntry] = &[
  // 1. Combos
  entry(1, TaskType::Collection, "Collection: Combos photo session"),
  entry(1, TaskType::Survey, "Survey: Combos photo session"),
  // 2. Lanzamiento
  entry(2, TaskType::Collection, "Collection: Launch event"),
  entry(2, TaskType::Survey, "Survey: Launch event"),
  entry(2, TaskType::Art, "Design: Launch artwork"),
  // 3. Exterior
  entry(3, TaskType::Collection, "Collection: Exterior photo session"),
  entry(3, TaskType::Survey, "Survey: Exterior photo session"),
  // 4. Pre-graduación
  entry(4, TaskType::Collection, "Collection: Pre-graduation session"),
  entry(4, TaskType::Survey, "Survey: Pre-graduation session"),
  entry(4, TaskType::Magazine, "Magazine: yearbook layout"),
  // 5. Graduación
  entry(5, TaskType::Collection, "Collection: Graduation ceremony"),
  entry(5, TaskType::Survey, "Survey: Graduation ceremony"),
  entry(5, TaskType::Art, "Design: Graduation artwork"),
  entry(5, TaskType::Mural, "Mural design"),
  entry(5, TaskType::Script, "Master of ceremonies script"),
  entry(5, TaskType::Program, "Event program"),
  entry(5, TaskType::Certificates, "Certificate printing: diplomas"),
  entry(5, TaskType::Certificates, "Certificate printing: honor roll"),
  entry(5, TaskType::Certificates, "Certificate printing: recognitions"),
  entry(5, TaskType::Certificates, "Certificate printing: teacher certificates"),
  entry(5, TaskType::Videos, "Marketing video: highlights"),
  entry(5, TaskType::Videos, "Marketing video: testimonials"),
  entry(5, TaskType::Videos, "Marketing video: social teaser"),
];

/// Filas del calendario para una fase.
pub fn for_phase(phase_id: u8) -> impl Iterator<Item = &'static ScheduleEntry> {
  SCHEDULE.iter().filter(move |e| e.phase_id == phase_id)
}
