mod app_error;
mod run;
mod taxlookup_cli;

pub use app_error::AppError;
pub use run::{build_validator, load_index};
pub use taxlookup_cli::{TaxLookupCliArguments, TaxLookupOperation};
