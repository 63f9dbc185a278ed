pub mod domain;
pub mod error;
pub mod input;
pub mod rules;

pub use domain::*;
pub use error::CoreError;
pub use input::{gather_record, InputProvider};
pub use rules::*;
