pub mod config;
pub mod errors;
pub mod util;

pub use errors::{AppError, AppResult};

pub type UserId = String;
