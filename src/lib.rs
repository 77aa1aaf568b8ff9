//! rdescribe: product photos to e-commerce catalog records
//!
//! # Overview
//!
//! rdescribe sends a product image to a vision LLM with a fixed listing prompt
//! and flattens the model's Markdown-style reply into an ordered field record
//! (Title, Product Description, Keywords, ...), plus an `Image` field that
//! points at the uploaded file.
//!
//! Key features:
//! - Tolerant extraction of `- **Label**: value` bullets, including multi-line values
//! - A derived `Image` reference that model output can never override
//! - Built-in Gemini client with inline image upload
//! - `VisionClient` trait for plugging in other providers
//!
//! # Quick Start
//!
//! ```no_run
//! use rdescribe::{GeminiClient, ProductDescriber};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let describer = ProductDescriber::new(GeminiClient::from_env()?);
//!     let record = describer.describe("upload/1717000000_boots.jpg").await?;
//!
//!     println!("{}", record.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! Extraction alone needs no network access:
//!
//! ```
//! let record = rdescribe::extract("- **Title**: Canvas Tote\n- **Style**: Minimal", "C:\\shots\\tote.png")?;
//! assert_eq!(record.image(), Some("../../upload/tote.png"));
//! assert_eq!(record.get("Style"), Some("Minimal"));
//! # Ok::<(), rdescribe::RDescribeError>(())
//! ```

mod backend;
#[cfg(feature = "cli")]
pub mod config;
mod describe;
mod error;
pub mod extract;
#[cfg(feature = "logging")]
pub mod logging;
pub mod prompt;

// Re-exports for convenience
pub use describe::ProductDescriber;
pub use error::{ApiErrorKind, RDescribeError, Result};
pub use extract::{FieldRecord, extract, image_reference, normalize_bullets};

#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiModel, gemini::GeminiConfig};

pub use backend::{MediaFile, VisionClient};
