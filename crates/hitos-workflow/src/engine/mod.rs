mod activation;
mod classify;

pub use activation::{ActivationEngine, ActivationOutcome};
pub use classify::{classify, missing_contacts, warn_missing_contacts, Candidates, Wake};
