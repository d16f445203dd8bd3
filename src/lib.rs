pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;

pub use error::{PipelineError, Result};
