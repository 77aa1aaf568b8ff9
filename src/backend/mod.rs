pub mod client;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod media;
#[cfg(feature = "gemini")]
pub mod utils;

pub use client::VisionClient;
#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, Model as GeminiModel};
pub use media::MediaFile;
#[cfg(feature = "gemini")]
pub(crate) use utils::{check_response_status, handle_http_error};
