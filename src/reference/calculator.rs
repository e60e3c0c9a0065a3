//! The lookup-table-backed reference calculator

use std::path::Path;

use super::equations::{self, lms_quantile, lms_zscore};
use super::error::ReferenceError;
use crate::data::parser::{gli, GliError};
use crate::data::table::{LookupTable, Parameter, Sex};

/// z-value of the 5th percentile, the conventional lower limit of normal
const LLN_Z: f64 = -1.644854;

/// Resolved M, S, L for one subject and parameter
struct Lms {
    m: f64,
    s: f64,
    l: f64,
}

/// Calculator for GLI-2012 spirometry reference values
///
/// Owns an immutable spline lookup table, loaded once at construction.
/// Every query is a pure function of its inputs plus the table, so a
/// calculator can be shared freely across threads behind `&` or `Arc`.
///
/// # Example
///
/// ```rust
/// use spirosol::{Calculator, Sex};
///
/// let calculator = Calculator::new().unwrap();
/// let fev1 = calculator.predict_fev1(Sex::Female, 95, 190.0).unwrap();
/// assert!(fev1 > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    table: LookupTable,
}

impl Calculator {
    /// Create a calculator backed by the bundled lookup table
    pub fn new() -> Result<Self, GliError> {
        Ok(Self {
            table: gli::read_gli_default()?,
        })
    }

    /// Create a calculator from a lookup table CSV file
    ///
    /// See [`read_gli`](crate::data::parser::read_gli) for the expected format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GliError> {
        Ok(Self {
            table: gli::read_gli(path)?,
        })
    }

    /// Create a calculator from a pre-built lookup table
    pub fn from_table(table: LookupTable) -> Self {
        Self { table }
    }

    /// The lookup table backing this calculator
    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    // ========================================================================
    // Predicted values
    // ========================================================================

    /// Predict a subject's healthy Forced Expiratory Volume in 1 second (L)
    ///
    /// # Arguments
    ///
    /// * `sex` - subject sex
    /// * `age` - age in whole years, must have a lookup-table cell
    /// * `height` - standing height (cm)
    pub fn predict_fev1(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.predict(Parameter::Fev1, sex, age, height)
    }

    /// Predict a subject's healthy Forced Vital Capacity (L)
    pub fn predict_fvc(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.predict(Parameter::Fvc, sex, age, height)
    }

    /// Predict a subject's healthy FEV1/FVC ratio (unitless)
    pub fn predict_fev1fvc(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.predict(Parameter::Fev1Fvc, sex, age, height)
    }

    // ========================================================================
    // Z-scores
    // ========================================================================

    /// Z-score of a measured FEV1 (L) against the reference distribution
    ///
    /// # Arguments
    ///
    /// * `sex` - subject sex
    /// * `age` - age in whole years, must have a lookup-table cell
    /// * `height` - standing height (cm)
    /// * `measured` - measured FEV1 (L), must be > 0
    pub fn zscore_fev1(
        &self,
        sex: Sex,
        age: u32,
        height: f64,
        measured: f64,
    ) -> Result<f64, ReferenceError> {
        self.zscore(Parameter::Fev1, sex, age, height, measured)
    }

    /// Z-score of a measured FVC (L) against the reference distribution
    pub fn zscore_fvc(
        &self,
        sex: Sex,
        age: u32,
        height: f64,
        measured: f64,
    ) -> Result<f64, ReferenceError> {
        self.zscore(Parameter::Fvc, sex, age, height, measured)
    }

    /// Z-score of a measured FEV1/FVC ratio against the reference distribution
    pub fn zscore_fev1fvc(
        &self,
        sex: Sex,
        age: u32,
        height: f64,
        measured: f64,
    ) -> Result<f64, ReferenceError> {
        self.zscore(Parameter::Fev1Fvc, sex, age, height, measured)
    }

    // ========================================================================
    // Lower limits of normal
    // ========================================================================

    /// Lower limit of normal (5th percentile) for FEV1 (L)
    pub fn lln_fev1(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.lln(Parameter::Fev1, sex, age, height)
    }

    /// Lower limit of normal (5th percentile) for FVC (L)
    pub fn lln_fvc(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.lln(Parameter::Fvc, sex, age, height)
    }

    /// Lower limit of normal (5th percentile) for the FEV1/FVC ratio
    pub fn lln_fev1fvc(&self, sex: Sex, age: u32, height: f64) -> Result<f64, ReferenceError> {
        self.lln(Parameter::Fev1Fvc, sex, age, height)
    }

    // ========================================================================
    // Shared resolve-then-evaluate routine
    // ========================================================================

    fn predict(
        &self,
        parameter: Parameter,
        sex: Sex,
        age: u32,
        height: f64,
    ) -> Result<f64, ReferenceError> {
        let lms = self.resolve(parameter, sex, age, height)?;
        Ok(lms.m)
    }

    fn zscore(
        &self,
        parameter: Parameter,
        sex: Sex,
        age: u32,
        height: f64,
        measured: f64,
    ) -> Result<f64, ReferenceError> {
        // Checked up front so the error holds for any age/height combination.
        // NaN fails the comparison and is rejected along with non-positives.
        if !(measured > 0.0) || !measured.is_finite() {
            return Err(ReferenceError::InvalidMeasurement {
                parameter,
                value: measured,
            });
        }
        let lms = self.resolve(parameter, sex, age, height)?;
        Ok(lms_zscore(measured, lms.m, lms.s, lms.l))
    }

    fn lln(
        &self,
        parameter: Parameter,
        sex: Sex,
        age: u32,
        height: f64,
    ) -> Result<f64, ReferenceError> {
        let lms = self.resolve(parameter, sex, age, height)?;
        Ok(lms_quantile(LLN_Z, lms.m, lms.s, lms.l))
    }

    /// Resolve the spline offsets for (sex, parameter, age) and evaluate the
    /// full M, S, L triple
    fn resolve(
        &self,
        parameter: Parameter,
        sex: Sex,
        age: u32,
        height: f64,
    ) -> Result<Lms, ReferenceError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(ReferenceError::OutOfDomain {
                field: "height",
                value: height,
            });
        }
        // ln(age) must stay real; the table should never carry age 0
        if age == 0 {
            return Err(ReferenceError::OutOfDomain {
                field: "age",
                value: 0.0,
            });
        }

        let splines =
            self.table
                .get(sex, parameter, age)
                .ok_or(ReferenceError::MissingEntry {
                    sex,
                    parameter,
                    age,
                })?;

        let eq = equations::equation_set(parameter, sex);
        let age = f64::from(age);
        Ok(Lms {
            m: eq.median.evaluate(height, age, splines.m),
            s: eq.cv.evaluate(age, splines.s),
            l: eq.skew.evaluate(age),
        })
    }
}
