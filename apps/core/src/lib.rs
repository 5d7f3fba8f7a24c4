//! # MindReader Core
//!
//! Emotion and deception analysis of text, face images and voice clips, backed by a
//! remote multimodal inference service.
//!
//! ```rust,ignore
//! use mindreader_core::{MindReader, MindReaderConfig, Style};
//!
//! let config = MindReaderConfig::load()?;
//! let reader = MindReader::connect(&config).await?;
//! match reader.analyze_text("Honestly, I was home all night.", Style::Calm).await {
//!     Ok(report) => println!("truthfulness: {}", report.lie_detection.truthfulness_score),
//!     Err(failure) => eprintln!("{}", failure.error),
//! }
//! ```

pub mod analysis;
pub mod backend;
pub mod config;
pub mod error;
pub mod telemetry;

pub use analysis::{
    AudioResult, ErrorResult, ImageResult, MindReader, MoodScan, Style, SuggestionResult, TextResult,
};
pub use config::MindReaderConfig;
pub use error::AppError;

#[cfg(test)]
mod tests;
