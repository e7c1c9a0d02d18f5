pub mod models;
pub mod validation;

pub use models::{DotfilesPolicy, StaticOptions, StaticOptionsBuilder};
pub use validation::{OptionsValidator, ValidationError, ValidationResult};
