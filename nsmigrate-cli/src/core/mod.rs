mod error;
mod types;

pub use error::MigrateError;
pub use types::{Diagnostic, Language, TextEdit};
