//! Data model for the GLI spline lookup table
//!
//! The reference equations are parametric in `ln(height)` and `ln(age)`, but
//! the GLI-2012 fit adds a tabulated smoothing-spline correction per
//! (sex, parameter, age) cell. [`LookupTable`] holds those corrections as an
//! immutable map keyed by the composite (sex, parameter, age) tuple.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subject sex, as coded in the GLI reference dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// A sex code outside the two recognized values
///
/// The dataset codes sex as `1` (male) or `0` (female); any other code is a
/// caller or data error, never defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid sex code: {code}. Expected 1 (male) or 0 (female)")]
pub struct InvalidSexCode {
    /// The unrecognized code
    pub code: i64,
}

impl Sex {
    /// Convert a raw dataset sex code (1 = male, 0 = female) to a [`Sex`]
    pub fn from_code(code: i64) -> Result<Self, InvalidSexCode> {
        match code {
            1 => Ok(Sex::Male),
            0 => Ok(Sex::Female),
            _ => Err(InvalidSexCode { code }),
        }
    }
}

/// The spirometry parameter a lookup row or query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Forced Expiratory Volume in 1 second (L)
    Fev1,
    /// Forced Vital Capacity (L)
    Fvc,
    /// FEV1/FVC ratio (unitless)
    Fev1Fvc,
}

/// A parameter name outside the three recognized spellings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown spirometry parameter: {name}. Expected fev1, fvc, or fev1fvc")]
pub struct UnknownParameter {
    /// The unrecognized name
    pub name: String,
}

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fev1" => Ok(Parameter::Fev1),
            "fvc" => Ok(Parameter::Fvc),
            "fev1fvc" => Ok(Parameter::Fev1Fvc),
            _ => Err(UnknownParameter { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Fev1 => write!(f, "fev1"),
            Parameter::Fvc => write!(f, "fvc"),
            Parameter::Fev1Fvc => write!(f, "fev1fvc"),
        }
    }
}

/// Spline offsets for one (sex, parameter, age) cell
///
/// `m` and `s` are added inside the exponent of the median and
/// coefficient-of-variation equations. `l` is carried from the source table
/// for completeness; the published skew equations are closed-form in age and
/// do not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineSet {
    /// M-spline offset (median equation)
    pub m: f64,
    /// S-spline offset (coefficient-of-variation equation)
    pub s: f64,
    /// L-spline offset (unused by the published equations)
    pub l: f64,
}

/// Immutable map from (sex, parameter, age) to spline offsets
///
/// Built once by [`read_gli`](crate::data::parser::read_gli) and never mutated
/// afterwards. Ages are whole years and must match queries exactly; there is
/// no interpolation between ages.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<(Sex, Parameter, u32), SplineSet>,
}

impl LookupTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, returning the previous value if the key was occupied
    ///
    /// The parser treats a `Some` return as a duplicate-key load error.
    pub fn insert(
        &mut self,
        sex: Sex,
        parameter: Parameter,
        age: u32,
        splines: SplineSet,
    ) -> Option<SplineSet> {
        self.entries.insert((sex, parameter, age), splines)
    }

    /// Look up the spline offsets for an exact (sex, parameter, age) key
    pub fn get(&self, sex: Sex, parameter: Parameter, age: u32) -> Option<&SplineSet> {
        self.entries.get(&(sex, parameter, age))
    }

    /// Number of cells in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no cells
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all (sex, parameter, age) keys
    pub fn keys(&self) -> impl Iterator<Item = &(Sex, Parameter, u32)> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_from_code() {
        assert_eq!(Sex::from_code(1), Ok(Sex::Male));
        assert_eq!(Sex::from_code(0), Ok(Sex::Female));
        assert_eq!(Sex::from_code(2), Err(InvalidSexCode { code: 2 }));
        assert_eq!(Sex::from_code(-1), Err(InvalidSexCode { code: -1 }));
    }

    #[test]
    fn test_parameter_from_str() {
        assert_eq!("fev1".parse::<Parameter>(), Ok(Parameter::Fev1));
        assert_eq!("FVC".parse::<Parameter>(), Ok(Parameter::Fvc));
        assert_eq!("fev1fvc".parse::<Parameter>(), Ok(Parameter::Fev1Fvc));
        assert!("pef".parse::<Parameter>().is_err());
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut table = LookupTable::new();
        let splines = SplineSet {
            m: 0.1,
            s: 0.01,
            l: 0.0,
        };
        assert!(table
            .insert(Sex::Male, Parameter::Fev1, 40, splines)
            .is_none());
        assert!(table
            .insert(Sex::Male, Parameter::Fev1, 40, splines)
            .is_some());
        assert_eq!(table.len(), 1);
    }
}
