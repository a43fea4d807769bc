// specialist.rs
use crate::staff::{normalize_label, StaffMember};

/// Devuelve el primer miembro del roster (en orden) que pertenece a
/// `department`. La comparación ignora mayúsculas, acentos y espacios.
pub fn find_specialist<'a>(roster: &'a [StaffMember], department: &str) -> Option<&'a StaffMember> {
  let target = normalize_label(department);
  if target.is_empty() {
    return None;
  }
  roster.iter().find(|member| member.departments().matches_normalized(&target))
}

/// Una estrategia de resolución de responsable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// Primer especialista del departamento.
  Specialist(String),
  /// Miembro con ese username, sin distinguir mayúsculas ni acentos (p. ej.
  /// el "padre" del centro).
  Username(String),
}

impl Resolution {
  pub fn resolve<'a>(&self, roster: &'a [StaffMember]) -> Option<&'a StaffMember> {
    match self {
      Resolution::Specialist(department) => find_specialist(roster, department),
      Resolution::Username(username) => {
        let target = normalize_label(username);
        roster.iter().find(|m| normalize_label(&m.username) == target)
      }
    }
  }
}

/// Lista ordenada de estrategias; gana la primera que resuelve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionChain(Vec<Resolution>);

impl ResolutionChain {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn specialist(mut self, department: &str) -> Self {
    self.0.push(Resolution::Specialist(department.to_string()));
    self
  }

  /// Añade la estrategia sólo si hay username configurado.
  pub fn username(mut self, username: Option<&str>) -> Self {
    if let Some(u) = username.map(str::trim).filter(|u| !u.is_empty()) {
      self.0.push(Resolution::Username(u.to_string()));
    }
    self
  }

  pub fn strategies(&self) -> &[Resolution] {
    &self.0
  }

  pub fn resolve<'a>(&self, roster: &'a [StaffMember]) -> Option<&'a StaffMember> {
    self.0.iter().find_map(|strategy| strategy.resolve(roster))
  }
}
