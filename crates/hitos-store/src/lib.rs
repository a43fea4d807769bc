//! Crate `hitos-store` — contratos de los colaboradores de persistencia
//!
//! Define los traits que el motor de activación consume (`StaffDirectory`,
//! `CenterStore`, `TaskStore`, `CaseStore`) y los commits por lotes de
//! `AgencyStore`: `commit_activation` aplica todas las escrituras de una
//! activación o ninguna, `commit_registration` hace lo mismo con el alta de
//! un centro y `rename_center` mueve un centro junto con sus tareas. `InMemoryAgencyStore` es una implementación no
//! durable para pruebas y para el binario de demostración.
//!
//! Ejemplo rápido:
//! ```rust
//! use hitos_domain::DomainStubs;
//! use hitos_store::{InMemoryAgencyStore, StaffDirectory};
//! let store = InMemoryAgencyStore::with_staff(DomainStubs::sample_roster());
//! assert!(store.find_by_department("Collector").unwrap().is_some());
//! ```
pub mod errors;
pub mod repository;
pub mod stubs;

pub use errors::*;
pub use repository::*;
pub use stubs::*;
