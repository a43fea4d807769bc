// staff.rs
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
  Administrator,
  Collaborator,
  Advisor,
}

/// Pertenencia a departamentos tal como llega del almacenamiento: a veces
/// como lista, a veces como texto separado por comas.
///
/// Es una violación de calidad de datos que debe corregirse aguas arriba;
/// aquí sólo se tolera y se convierte una vez a `Departments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepartmentField {
  List(Vec<String>),
  Text(String),
}

impl DepartmentField {
  /// Representación canónica: conjunto ordenado de nombres recortados.
  pub fn canonical(&self) -> Departments {
    let names: IndexSet<String> = match self {
      DepartmentField::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
      DepartmentField::Text(text) => text.split(',').map(|s| s.trim().to_string()).collect(),
    };
    Departments(names.into_iter().filter(|s| !s.is_empty()).collect())
  }
}

impl Default for DepartmentField {
  fn default() -> Self {
    DepartmentField::List(Vec::new())
  }
}

/// Conjunto ordenado de departamentos de un miembro del staff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Departments(IndexSet<String>);

impl Departments {
  /// `target` debe venir ya normalizado con `normalize_label`.
  pub fn matches_normalized(&self, target: &str) -> bool {
    self.0.iter().any(|d| normalize_label(d) == target)
  }

  pub fn contains(&self, department: &str) -> bool {
    self.matches_normalized(&normalize_label(department))
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Minúsculas, sin diacríticos y sin espacios en los extremos.
pub fn normalize_label(label: &str) -> String {
  label.trim()
       .nfd()
       .filter(|c| !is_combining_mark(*c))
       .collect::<String>()
       .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
  pub id: i64,
  pub username: String,
  pub full_name: String,
  pub role: StaffRole,
  pub active: bool,
  #[serde(default)]
  pub departments: DepartmentField,
}

impl StaffMember {
  pub fn new(id: i64, username: &str, full_name: &str, role: StaffRole, departments: DepartmentField) -> Self {
    Self { id,
           username: username.to_string(),
           full_name: full_name.to_string(),
           role,
           active: true,
           departments }
  }

  pub fn departments(&self) -> Departments {
    self.departments.canonical()
  }
}
