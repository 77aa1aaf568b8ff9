//! Prompt sent alongside the product image.

/// Fields the model is asked to produce, in the order they should appear.
pub const LISTING_FIELDS: &[&str] = &[
    "Title",
    "Product Description",
    "Meta Description",
    "Key Features",
    "Use Cases",
    "Material",
    "Style",
    "Keywords",
    "Call to Action",
    "Sizes (if available)",
];

/// Build the product-listing prompt.
///
/// The reply is expected as `- **Field**: value` bullets, which is what
/// [`extract`](crate::extract) understands, but nothing downstream depends on
/// the model sticking to this exact list.
pub fn product_listing_prompt() -> String {
    let mut prompt = String::from(
        "This is an image of a product to be listed on an e-commerce website.\n\
         Describe the product in an SEO-optimized manner to help it rank better.\n\
         Include only the following fields in the output:\n",
    );
    for field in LISTING_FIELDS {
        prompt.push_str("- ");
        prompt.push_str(field);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nFormat every field as a Markdown bullet of the form `- **Field**: value`.\n\
         Do not include any other lines or sections in the description.\n",
    );
    prompt
}
