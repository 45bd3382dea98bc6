//! Errors surfaced while assembling a router.
//!
//! Input handling itself never fails: invalid clicks are absorbed as no-ops
//! and only logged.
use thiserror::Error;

use crate::scenario::ScenarioError;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("router requires a world before building")]
    MissingWorld,

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}
