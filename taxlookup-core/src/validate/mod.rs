mod lookup_outcome;
mod validation_outcome;
mod validator;

pub use lookup_outcome::LookupOutcome;
pub use validation_outcome::ValidationOutcome;
pub use validator::Validator;
