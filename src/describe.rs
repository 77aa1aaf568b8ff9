//! End-to-end product description: image in, catalog record out.

use std::path::Path;

use tracing::{info, instrument};

use crate::backend::{MediaFile, VisionClient};
use crate::error::Result;
use crate::extract::{FieldRecord, extract, image_reference};
use crate::prompt::product_listing_prompt;

/// Describes product images with a [`VisionClient`] and flattens the reply.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use rdescribe::{GeminiClient, ProductDescriber};
///
/// let describer = ProductDescriber::new(GeminiClient::from_env()?);
/// let record = describer.describe("uploads/1700000000_mug.jpg").await?;
/// println!("{}", record.to_json()?);
/// # Ok(())
/// # }
/// ```
pub struct ProductDescriber<C> {
    client: C,
    prompt: String,
}

impl<C: VisionClient> ProductDescriber<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            prompt: product_listing_prompt(),
        }
    }

    /// Replace the default product-listing prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Send the image at `image_path` to the model and extract the listing fields.
    ///
    /// The path is checked for a usable file name before the image is read, so
    /// an unusable path never costs a model call.
    #[instrument(skip(self, image_path), fields(image_path = %image_path.as_ref()))]
    pub async fn describe(&self, image_path: impl AsRef<str>) -> Result<FieldRecord> {
        let image_path = image_path.as_ref();
        image_reference(image_path)?;

        let media = MediaFile::from_path(Path::new(image_path)).await?;
        let reply = self
            .client
            .generate_with_media(&self.prompt, std::slice::from_ref(&media))
            .await?;

        let record = self.describe_response(&reply, image_path)?;
        info!(fields = record.len(), "Described product image");
        Ok(record)
    }

    /// Extract a record from a reply obtained elsewhere.
    pub fn describe_response(&self, reply: &str, image_path: &str) -> Result<FieldRecord> {
        extract(reply, image_path)
    }
}
