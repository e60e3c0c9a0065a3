//! GLI-2012 spirometry reference calculations
//!
//! This module predicts healthy-population spirometry values and standardizes
//! measured values against them. It integrates with the lookup-table data
//! layer ([`crate::data`]) and exposes a single entry point, [`Calculator`].
//!
//! # Design Philosophy
//!
//! - **Simple**: one calculator object, six query operations
//! - **Table-backed**: spline offsets resolved per (sex, parameter, age) cell
//! - **Pure**: every operation is a function of its inputs plus the immutable table
//!
//! # Key Quantities
//!
//! | Quantity | Description |
//! |----------|-------------|
//! | M | Predicted population median (the "predicted value") |
//! | S | Coefficient of variation of the reference distribution |
//! | L | Skewness (Box-Cox power) of the reference distribution |
//! | z-score | Standard deviations a measurement lies from M, skew-adjusted |
//! | LLN | Lower limit of normal, the 5th percentile of the distribution |
//!
//! # Usage
//!
//! ```rust
//! use spirosol::prelude::*;
//! use spirosol::prelude::data::Sex;
//!
//! let calculator = Calculator::new().unwrap();
//!
//! let predicted = calculator.predict_fvc(Sex::Male, 75, 170.0).unwrap();
//! let zscore = calculator.zscore_fvc(Sex::Male, 75, 170.0, 2.9).unwrap();
//!
//! println!("Predicted FVC: {:.2} L", predicted);
//! println!("Measured 2.9 L is {:.2} SD from predicted", zscore);
//! ```

// Internal modules
mod calculator;
mod equations;
mod error;


// Public API
pub use calculator::Calculator;
pub use error::ReferenceError;
