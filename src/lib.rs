pub mod data;
pub mod error;
pub mod reference;

pub use crate::data::parser::read_gli;
pub use crate::data::table::{LookupTable, Parameter, Sex, SplineSet};
pub use crate::reference::{Calculator, ReferenceError};
pub use error::SpirosolError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            parser::{read_gli, GliError},
            table::{LookupTable, Parameter, Sex, SplineSet},
        };
    }
    pub use crate::reference::{Calculator, ReferenceError};
    pub use crate::SpirosolError;
}
