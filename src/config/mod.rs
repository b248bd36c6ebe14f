// src/config/mod.rs
pub mod sentiment;

pub use sentiment::{
    AnalyzerConfig, BlendConfig, ClassifierConfig, EnglishConfig, LanguageConfig, ScorerConfig,
    ServerConfig, SplitterConfig,
};
