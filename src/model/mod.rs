pub mod config;
pub mod date_fields;
pub mod selection;
pub mod task;

pub use config::*;
pub use date_fields::*;
pub use selection::*;
pub use task::*;
