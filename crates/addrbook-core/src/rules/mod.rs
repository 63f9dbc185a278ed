pub mod import;
pub mod validation;

pub use import::ImportPolicy;
pub use validation::{rule_for, validate_field, FieldRule};
