//! Reference calculation error types

use crate::data::table::{InvalidSexCode, Parameter, Sex};
use thiserror::Error;

/// Errors that can occur while evaluating the reference equations
///
/// All variants carry the offending field and value. None are retried or
/// defaulted internally; a failed call never produces a number.
#[derive(Error, Debug, Clone)]
pub enum ReferenceError {
    /// No lookup-table cell for the requested (sex, parameter, age)
    ///
    /// Ages must match table cells exactly; there is no rounding or
    /// interpolation to a nearby age.
    #[error("Participant value not present in lookup: sex {sex:?}, parameter {parameter}, age {age}")]
    MissingEntry {
        sex: Sex,
        parameter: Parameter,
        age: u32,
    },

    /// A raw sex code outside the two recognized values
    #[error(transparent)]
    InvalidSex(#[from] InvalidSexCode),

    /// Measured value for a z-score is NaN or not strictly positive
    #[error("Invalid measured {parameter}: {value}. Measurement must be > 0")]
    InvalidMeasurement { parameter: Parameter, value: f64 },

    /// An input outside the domain of the reference equations
    ///
    /// Raised before any logarithm can produce a non-real intermediate.
    #[error("Invalid {field}: {value}. Value must be positive and finite")]
    OutOfDomain { field: &'static str, value: f64 },
}
