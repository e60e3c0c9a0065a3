use thiserror::Error;

use crate::data::parser::GliError;
use crate::reference::ReferenceError;

#[derive(Error, Debug)]
pub enum SpirosolError {
    #[error("Error loading the lookup table: {0}")]
    GliError(#[from] GliError),
    #[error("Error evaluating the reference equations: {0}")]
    ReferenceError(#[from] ReferenceError),
}
