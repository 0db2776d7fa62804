pub mod affect_pipeline;
pub mod utils;

pub use affect_pipeline::*;
pub use crate::core::global_cache;
