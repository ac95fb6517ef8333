// File I/O operations

pub mod csv;
pub mod error;
pub mod swap;

pub use error::PipelineError;
