mod locale;
mod value;

pub use locale::{LocaleId, LocaleIdError};
pub use value::{Substitution, Value};
