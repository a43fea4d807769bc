mod case;
mod center;
mod domain_stubs;
mod errors;
mod phase_matrix;
mod specialist;
mod staff;
mod task;

pub use case::{Case, CaseStatus};
pub use center::Center;
pub use domain_stubs::DomainStubs;
pub use errors::DomainError;
pub use phase_matrix::{is_design_key, PhaseDefinition, PhaseMatrix, ServiceType};
pub use specialist::{find_specialist, Resolution, ResolutionChain};
pub use staff::{normalize_label, DepartmentField, Departments, StaffMember, StaffRole};
pub use task::{HistoryEntry, Task, TaskStatus, TaskType, SYSTEM_AUTHOR};
