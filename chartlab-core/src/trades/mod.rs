//! Trade log classification

pub mod classifier;

pub use classifier::{classify, TradeEventClassifier};
