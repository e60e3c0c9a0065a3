pub mod gli;

pub use gli::{read_gli, GliError};
