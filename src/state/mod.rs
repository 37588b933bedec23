//! Application state module

mod app_state;
mod field;
mod form_record;
mod wizard;

pub use app_state::*;
pub use field::*;
pub use form_record::*;
pub use wizard::*;
