pub mod color;
pub mod config;
pub mod error;
pub mod geo;
pub mod map;
pub mod session;
pub mod todo;
pub mod utils;

pub use error::AppError;
pub use session::{PendingMode, Session};
