// classify.rs
//
// Responsables candidatos de una activación y clasificación de cada tarea
// latente en la categoría de rol que le corresponde.
use hitos_domain::{Center, PhaseDefinition, ResolutionChain, StaffMember, Task, TaskType};

/// Responsables resueltos una sola vez por activación.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
  pub logistics: Option<String>,
  pub marketing: Option<String>,
  pub art: Option<String>,
  pub parent: Option<String>,
}

impl Candidates {
  pub fn logistics_chain() -> ResolutionChain {
    ResolutionChain::new().specialist("Collector").specialist("Logistics")
  }

  pub fn marketing_chain(center: &Center) -> ResolutionChain {
    ResolutionChain::new().username(center.aunt_uncle_staff.as_deref())
                          .specialist("Marketing")
  }

  pub fn art_chain() -> ResolutionChain {
    ResolutionChain::new().specialist("Art")
  }

  pub fn parent_chain(center: &Center) -> ResolutionChain {
    ResolutionChain::new().username(center.parent_staff.as_deref())
  }

  pub fn resolve(center: &Center, roster: &[StaffMember]) -> Self {
    warn_missing_contacts(center, roster);
    let name = |chain: ResolutionChain| chain.resolve(roster).map(|m| m.username.clone());
    Self { logistics: name(Self::logistics_chain()),
           marketing: name(Self::marketing_chain(center)),
           art: name(Self::art_chain()),
           parent: name(Self::parent_chain(center)) }
  }
}

/// Contactos configurados en el centro (rol, username) que no aparecen en
/// el directorio. Sus cadenas de resolución los saltan.
pub fn missing_contacts<'a>(center: &'a Center, roster: &[StaffMember]) -> Vec<(&'static str, &'a str)> {
  [("padre", center.parent_staff.as_deref()), ("tio/tia", center.aunt_uncle_staff.as_deref())]
    .into_iter()
    .filter_map(|(role, username)| username.map(|u| (role, u)))
    .filter(|(_, u)| ResolutionChain::new().username(Some(*u)).resolve(roster).is_none())
    .collect()
}

pub fn warn_missing_contacts(center: &Center, roster: &[StaffMember]) {
  for (role, username) in missing_contacts(center, roster) {
    log::warn!("centro '{}': el {} configurado '{}' no está en el directorio; se ignora",
               center.name,
               role,
               username);
  }
}

/// Resultado de clasificar una tarea latente: título de la activación y
/// responsable propuesto (antes del respaldo al padre del centro).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wake {
  pub title: String,
  pub responsible: Option<String>,
}

/// Decide si una tarea latente se despierta con una clave de fase. `None`
/// significa que ese tipo necesita su propia activación.
pub fn classify(task: &Task, phase: &PhaseDefinition, design_key: bool, candidates: &Candidates) -> Option<Wake> {
  match (design_key, task.task_type) {
    (true, TaskType::Art) => Some(Wake { title: format!("Design: {}", phase.description),
                                         responsible: candidates.art.clone() }),
    (false, TaskType::Collection) => Some(Wake { title: format!("Photography: {}", phase.description),
                                                 responsible: candidates.logistics.clone() }),
    (false, TaskType::Survey) => Some(Wake { title: "Surveys: Data Management".to_string(),
                                             responsible: candidates.marketing.clone() }),
    _ => None,
  }
}
