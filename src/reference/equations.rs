//! Closed-form GLI-2012 reference equations
//!
//! This module contains the published coefficient sets and the stateless
//! functions that evaluate them. Each (parameter, sex) pair has a median (M)
//! equation in `ln(height)` and `ln(age)`, a coefficient-of-variation (S)
//! equation in `ln(age)`, and a skewness (L) term that is either a constant
//! or linear in `ln(age)`. The tabulated spline offsets enter additively
//! inside the M and S exponents.

use crate::data::table::{Parameter, Sex};

/// Below this magnitude L is treated as zero and the z-score transform
/// switches to its limiting form
const L_EPSILON: f64 = 1e-10;

// ============================================================================
// Coefficient sets
// ============================================================================

/// Median equation: M = exp(intercept + ln_height·ln(h) + ln_age·ln(a) + Mspline)
#[derive(Debug, Clone, Copy)]
pub(crate) struct MedianEq {
    intercept: f64,
    ln_height: f64,
    ln_age: f64,
}

/// Coefficient-of-variation equation: S = exp(intercept + ln_age·ln(a) + Sspline)
#[derive(Debug, Clone, Copy)]
pub(crate) struct CvEq {
    intercept: f64,
    ln_age: f64,
}

/// Skewness term: constant for the volume parameters, linear in ln(age) for
/// the FEV1/FVC ratio
#[derive(Debug, Clone, Copy)]
pub(crate) enum SkewEq {
    Constant(f64),
    LogAge { intercept: f64, ln_age: f64 },
}

/// The full equation set for one (parameter, sex) pair
#[derive(Debug, Clone, Copy)]
pub(crate) struct EquationSet {
    pub median: MedianEq,
    pub cv: CvEq,
    pub skew: SkewEq,
}

const FEV1_MALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: -11.399108,
        ln_height: 2.462664,
        ln_age: -0.011394,
    },
    cv: CvEq {
        intercept: -2.256278,
        ln_age: 0.080729,
    },
    skew: SkewEq::Constant(1.22703),
};

const FEV1_FEMALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: -10.901689,
        ln_height: 2.385928,
        ln_age: -0.076386,
    },
    cv: CvEq {
        intercept: -2.364047,
        ln_age: 0.129402,
    },
    skew: SkewEq::Constant(1.21388),
};

const FVC_MALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: -12.629131,
        ln_height: 2.727421,
        ln_age: 0.009174,
    },
    cv: CvEq {
        intercept: -2.195595,
        ln_age: 0.068466,
    },
    skew: SkewEq::Constant(0.9346),
};

const FVC_FEMALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: -12.055901,
        ln_height: 2.621579,
        ln_age: -0.035975,
    },
    cv: CvEq {
        intercept: -2.310148,
        ln_age: 0.120428,
    },
    skew: SkewEq::Constant(0.89900),
};

const FEV1FVC_MALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: 1.022608,
        ln_height: -0.218592,
        ln_age: -0.027584,
    },
    cv: CvEq {
        intercept: -2.882024,
        ln_age: 0.068889,
    },
    skew: SkewEq::LogAge {
        intercept: 3.8243,
        ln_age: -0.3328,
    },
};

const FEV1FVC_FEMALE: EquationSet = EquationSet {
    median: MedianEq {
        intercept: 0.9189568,
        ln_height: -0.1840671,
        ln_age: -0.0461306,
    },
    cv: CvEq {
        intercept: -3.171582,
        ln_age: 0.144358,
    },
    skew: SkewEq::LogAge {
        intercept: 6.6490,
        ln_age: -0.9920,
    },
};

/// The published equation set for a (parameter, sex) pair
pub(crate) fn equation_set(parameter: Parameter, sex: Sex) -> &'static EquationSet {
    match (parameter, sex) {
        (Parameter::Fev1, Sex::Male) => &FEV1_MALE,
        (Parameter::Fev1, Sex::Female) => &FEV1_FEMALE,
        (Parameter::Fvc, Sex::Male) => &FVC_MALE,
        (Parameter::Fvc, Sex::Female) => &FVC_FEMALE,
        (Parameter::Fev1Fvc, Sex::Male) => &FEV1FVC_MALE,
        (Parameter::Fev1Fvc, Sex::Female) => &FEV1FVC_FEMALE,
    }
}

// ============================================================================
// Evaluation
// ============================================================================

impl MedianEq {
    /// Predicted population median for the given height (cm) and age (years)
    #[inline]
    pub fn evaluate(&self, height: f64, age: f64, m_spline: f64) -> f64 {
        (self.intercept + self.ln_height * height.ln() + self.ln_age * age.ln() + m_spline).exp()
    }
}

impl CvEq {
    /// Coefficient of variation for the given age (years)
    #[inline]
    pub fn evaluate(&self, age: f64, s_spline: f64) -> f64 {
        (self.intercept + self.ln_age * age.ln() + s_spline).exp()
    }
}

impl SkewEq {
    /// Skewness (Box-Cox power) for the given age (years)
    #[inline]
    pub fn evaluate(&self, age: f64) -> f64 {
        match self {
            SkewEq::Constant(l) => *l,
            SkewEq::LogAge { intercept, ln_age } => intercept + ln_age * age.ln(),
        }
    }
}

/// LMS z-score of a measured value against reference M, S, L
///
/// Uses the limiting form `ln(measured/M)/S` when L vanishes, since the
/// general transform divides by L. The published coefficient sets never
/// realize L = 0 exactly, but the ratio skew term crosses zero algebraically
/// and future table revisions could hit it.
#[inline]
pub(crate) fn lms_zscore(measured: f64, m: f64, s: f64, l: f64) -> f64 {
    if l.abs() < L_EPSILON {
        (measured / m).ln() / s
    } else {
        ((measured / m).powf(l) - 1.0) / (l * s)
    }
}

/// Value at a given z of the reference distribution (inverse LMS transform)
///
/// Used for the lower limit of normal. Mirrors the limiting form of
/// [`lms_zscore`] at L = 0.
#[inline]
pub(crate) fn lms_quantile(z: f64, m: f64, s: f64, l: f64) -> f64 {
    if l.abs() < L_EPSILON {
        m * (s * z).exp()
    } else {
        m * (1.0 + l * s * z).powf(1.0 / l)
    }
}
