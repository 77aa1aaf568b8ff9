use async_trait::async_trait;

use crate::backend::MediaFile;
use crate::error::Result;

/// VisionClient defines the interface to a generative model that accepts images.
///
/// Implementations return the model's reply verbatim. Turning that reply into
/// catalog fields is the job of [`extract`](crate::extract), so a client never
/// inspects the text it receives; an empty reply is a valid reply.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use rdescribe::{GeminiClient, MediaFile, VisionClient};
///
/// let client = GeminiClient::from_env()?;
/// let photo = MediaFile::from_path("shoe.jpg").await?;
///
/// let reply = client
///     .generate_with_media("Describe this product", &[photo])
///     .await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Send a prompt together with inline media and return the raw text reply.
    async fn generate_with_media(&self, prompt: &str, media: &[MediaFile]) -> Result<String>;

    /// Raw text completion without any media attached.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_media(prompt, &[]).await
    }
}
