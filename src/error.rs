
use thiserror::Error;

/// Error raised when a unit key is absent from the relevant unit
/// table, either while constructing a quantity or while converting
/// one. Carries the offending key verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown unit type: '{unit}'")]
pub struct UnknownUnit {
  pub unit: String,
}

impl UnknownUnit {
  pub fn new(unit: impl Into<String>) -> Self {
    Self { unit: unit.into() }
  }
}
