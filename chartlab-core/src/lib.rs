//! ChartLab Core: indicators, trade classification and chart composition.
//!
//! This crate turns a price series and a broker trade log into a
//! renderer-agnostic figure description:
//! - Domain types (bars, price and indicator series, trade events)
//! - EMA and MACD computation, plus a stateful two-step MACD context
//! - Trade-log classification (side mapping, exclusion, time ordering)
//! - Panel layout planning and layer composition
//! - TOML chart configuration and CSV loaders

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod pipeline;
pub mod trades;

pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use pipeline::{build_figure, render_files};
