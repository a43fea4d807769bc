// center.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Centro (escuela cliente). Su identidad es el nombre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
  pub id: Uuid,
  pub name: String,
  pub display_name: String,
  pub center_type: String,
  pub advisor: Option<String>,
  /// Contacto de escalado por defecto.
  pub parent_staff: Option<String>,
  /// Contacto de encuestas de marketing.
  pub aunt_uncle_staff: Option<String>,
  pub visible: bool,
  pub created_at: DateTime<Utc>,
}

impl Center {
  pub fn new(name: &str, center_type: &str) -> Result<Self, DomainError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(DomainError::ValidationError("El nombre del centro no puede estar vacío".to_string()));
    }
    Ok(Self { id: Uuid::new_v4(),
              name: name.to_string(),
              display_name: name.to_string(),
              center_type: center_type.trim().to_string(),
              advisor: None,
              parent_staff: None,
              aunt_uncle_staff: None,
              visible: true,
              created_at: Utc::now() })
  }

  pub fn with_roles(mut self,
                    advisor: Option<String>,
                    parent_staff: Option<String>,
                    aunt_uncle_staff: Option<String>)
                    -> Self {
    self.advisor = clean(advisor);
    self.parent_staff = clean(parent_staff);
    self.aunt_uncle_staff = clean(aunt_uncle_staff);
    self
  }

  /// Cambia el nombre (y el nombre visible). Rechaza nombres vacíos.
  pub fn rename(&mut self, new_name: &str) -> Result<(), DomainError> {
    let name = new_name.trim();
    if name.is_empty() {
      return Err(DomainError::ValidationError("El nombre del centro no puede estar vacío".to_string()));
    }
    self.name = name.to_string();
    self.display_name = name.to_string();
    Ok(())
  }

  /// Comparación de nombres usada para detectar duplicados al registrar.
  pub fn same_name(&self, other: &str) -> bool {
    self.name.to_lowercase() == other.trim().to_lowercase()
  }
}

fn clean(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
