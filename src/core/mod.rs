pub mod calendar;
pub mod error;

pub use error::{AppError, Result};
