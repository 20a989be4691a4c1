//! Analysis results handed to the presentation layer.

pub mod model;

pub use model::{
    AnalysisResult, ArticleResult, Classification, CredibilityRating, CredibilityResult,
    FreeTextResult, Severity,
};
