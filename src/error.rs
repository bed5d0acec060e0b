use thiserror::Error;

use crate::pdgcode::PdgCode;

/// Recoverable failures of the action layer.
///
/// Misuse of the action lifecycle (resolving twice, resolving a zero-weight
/// action, ...) is not represented here: those are programming errors and
/// panic.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown particle species: {0}")]
    UnknownSpecies(PdgCode),

    #[error("No cross section parametrization for the pair {a} + {b}")]
    UnknownParametrization { a: PdgCode, b: PdgCode },

    #[error("Conservation violated: {0}")]
    ConservationViolation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ActionResult<T> = Result<T, ActionError>;
