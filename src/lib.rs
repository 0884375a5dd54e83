pub mod error;
pub mod math;
pub mod operations;
pub mod topology;
pub mod traversal;

pub use error::{Result, StrakeError};
