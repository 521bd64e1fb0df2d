pub mod batch;
pub mod session;
pub mod sort;

pub use session::{BatchOutcome, Session};
