//! hitos-workflow: sembrado y activación de hitos por fase
//!
//! Orquesta el dominio (`hitos_domain`) sobre los almacenes de
//! `hitos_store`: siembra las tareas latentes de un centro, las despierta
//! cuando llega el disparador de una fase y sincroniza los casos asociados.

pub mod config;
pub mod engine;
pub mod errors;
pub mod seeding;
pub mod service;

pub use config::{ExhaustedPolicy, WorkflowConfig};
pub use engine::{ActivationEngine, ActivationOutcome};
pub use errors::WorkflowError;
pub use seeding::TaskSeeder;
pub use service::{ActivatePhaseRequest, AgencyService, SeedCenterRequest};
