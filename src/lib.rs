pub mod core;
pub mod loaders;
pub mod models;
pub mod paragraph;
pub mod pipelines;
pub mod server;

// Re-export the types most callers need
pub use crate::core::{PredictError, ServiceConfig};
pub use pipelines::affect_pipeline::{
    AffectPipeline, AffectPipelineBuilder, BertScorer, Emotion, EmotionCutoff, Scorer,
};
pub use server::{create_router, PredictResponse};
