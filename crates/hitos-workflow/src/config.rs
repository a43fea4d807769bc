use crate::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qué hace una activación cuando no despierta ninguna tarea.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustedPolicy {
    /// Crea una tarea suelta con un caso de emergencia.
    Emergency,
    /// No hace nada y lo informa como `ActivationOutcome::Skipped`.
    NoOp,
    /// Devuelve `WorkflowError::Conflict`.
    Error,
}

impl fmt::Display for ExhaustedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExhaustedPolicy::Emergency => "emergency",
            ExhaustedPolicy::NoOp => "noop",
            ExhaustedPolicy::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ExhaustedPolicy {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emergency" => Ok(ExhaustedPolicy::Emergency),
            "noop" | "no-op" | "skip" => Ok(ExhaustedPolicy::NoOp),
            "error" | "fail" => Ok(ExhaustedPolicy::Error),
            other => Err(WorkflowError::Validation(format!("politica desconocida: {}", other))),
        }
    }
}

/// Configuracion del sembrado y la activacion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Exige que cada tarea siga en STANDBY al escribir el lote.
    pub conditional_activation: bool,
    pub exhausted_policy: ExhaustedPolicy,
    /// Crea tambien un caso Pending por cada tarea sembrada.
    pub seed_cases: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig { conditional_activation: true,
                         exhausted_policy: ExhaustedPolicy::Emergency,
                         seed_cases: false }
    }
}

pub const ENV_CONDITIONAL_ACTIVATION: &str = "HITOS_CONDITIONAL_ACTIVATION";
pub const ENV_EXHAUSTED_POLICY: &str = "HITOS_EXHAUSTED_POLICY";
pub const ENV_SEED_CASES: &str = "HITOS_SEED_CASES";

impl WorkflowConfig {
    /// Lee la configuracion de las variables de entorno del proceso. Las
    /// ausentes conservan su valor por defecto.
    pub fn from_env() -> Result<Self, WorkflowError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectada.
    pub fn from_vars<F>(lookup: F) -> Result<Self, WorkflowError>
        where F: Fn(&str) -> Option<String>
    {
        let mut config = WorkflowConfig::default();
        if let Some(v) = lookup(ENV_CONDITIONAL_ACTIVATION) {
            config.conditional_activation = parse_flag(ENV_CONDITIONAL_ACTIVATION, &v)?;
        }
        if let Some(v) = lookup(ENV_EXHAUSTED_POLICY) {
            config.exhausted_policy = v.parse()?;
        }
        if let Some(v) = lookup(ENV_SEED_CASES) {
            config.seed_cases = parse_flag(ENV_SEED_CASES, &v)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, WorkflowError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WorkflowError::Validation(format!("{} no es booleano: {}", name, other))),
    }
}
