pub mod parser;
pub mod table;
pub use parser::read_gli;
pub use table::{LookupTable, Parameter, Sex, SplineSet};
