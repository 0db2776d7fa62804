pub mod affect_bert;

pub use affect_bert::{AffectBertModel, AffectHead, AffectModelOptions};
