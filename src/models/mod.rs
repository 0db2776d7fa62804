pub mod bert;
pub mod implementations;

pub use bert::{BertConfig, BertModel};
pub use implementations::{AffectBertModel, AffectHead, AffectModelOptions};
