//! Field extraction from a model's Markdown-flavoured product description.
//!
//! Vision models asked for a fixed set of listing fields tend to answer with
//! bold bullets such as `- **Title**: Blue Widget`, sometimes with values that
//! run over several lines. [`extract`] flattens that reply into a
//! [`FieldRecord`] and adds an `Image` field pointing at the uploaded file.

mod record;

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::error::{RDescribeError, Result};

pub use record::{FieldRecord, IMAGE_KEY};

/// Relative location the catalog front end serves uploaded images from.
pub const UPLOAD_PREFIX: &str = "../../upload/";

/// Marker that opens a bullet entry when it starts a line.
const BULLET_START: &str = "\n- **";

static BULLET_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)- \*\*(.*?)\*\*: ").expect("bullet header pattern is valid")
});

/// Build a [`FieldRecord`] from a raw model reply and the path of the image it describes.
///
/// Bullet entries are first normalized with [`normalize_bullets`]. Every line
/// that then contains a colon becomes a field, split at the first colon. Keys
/// lose leftover bullet and bold markup; values lose every `**`. Lines without
/// a colon are ignored.
///
/// The `Image` field is always the one derived from `image_path` by
/// [`image_reference`]; an `Image:` line in the reply cannot override it.
///
/// # Errors
///
/// [`RDescribeError::InvalidInput`] if `image_path` has no file-name segment.
/// Malformed or empty `raw_text` is never an error.
///
/// # Examples
///
/// ```
/// let record = rdescribe::extract("- **Title**: Blue Widget\n- **Material**: Steel", "/a/b/photo.jpg")?;
///
/// assert_eq!(record.get("Image"), Some("../../upload/photo.jpg"));
/// assert_eq!(record.get("Title"), Some("Blue Widget"));
/// assert_eq!(record.get("Material"), Some("Steel"));
/// # Ok::<(), rdescribe::RDescribeError>(())
/// ```
#[instrument(skip(raw_text), fields(text_len = raw_text.len()))]
pub fn extract(raw_text: &str, image_path: &str) -> Result<FieldRecord> {
    let mut record = FieldRecord::new();
    record.insert(IMAGE_KEY, image_reference(image_path)?);

    let cleaned = normalize_bullets(raw_text);
    for line in cleaned.split(is_line_boundary) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = clean_key(key);
        if key.is_empty() {
            trace!(line, "Skipping line with empty key");
            continue;
        }
        if key == IMAGE_KEY {
            debug!("Ignoring Image field emitted by the model");
            continue;
        }

        let value = value.replace("**", "");
        record.insert(key, value.trim());
    }

    debug!(fields = record.len(), "Extracted fields from response");
    Ok(record)
}

/// Rewrite every `- **Label**: value` bullet as a plain `Label: value` entry.
///
/// A bullet's value runs until the next line that opens another bullet, or to
/// the end of the text, so multi-line values are carried along untouched. Text
/// without bullets (including already-normalized `Key: value` lines) comes
/// back unchanged.
pub fn normalize_bullets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(caps) = BULLET_HEADER.captures_at(text, cursor) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let value_start = whole.end();
        let value_end = text[value_start..]
            .find(BULLET_START)
            .map_or(text.len(), |offset| value_start + offset);

        out.push_str(&text[cursor..whole.start()]);
        out.push_str(label.as_str());
        out.push_str(": ");
        out.push_str(&text[value_start..value_end]);
        cursor = value_end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Derive the catalog reference `../../upload/<filename>` for an image path.
///
/// Purely syntactic: the file does not need to exist. Backslash separators are
/// treated like `/`.
///
/// # Errors
///
/// [`RDescribeError::InvalidInput`] when the path is empty or does not end in
/// a file name (`"dir/"`, `".."`).
pub fn image_reference(image_path: &str) -> Result<String> {
    if image_path.trim().is_empty() {
        return Err(RDescribeError::invalid_input("image path is empty"));
    }

    let normalized = image_path.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or_default();
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return Err(RDescribeError::invalid_input(format!(
            "image path '{}' has no file name",
            image_path
        )));
    }

    Ok(format!("{}{}", UPLOAD_PREFIX, file_name))
}

/// Line boundaries recognised when splitting a reply: `\n`, `\r` (so `\r\n` and
/// a lone `\r` both end a line) and the rarer Unicode separators.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn clean_key(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches('-')
        .trim_matches(|c: char| c == '*' || c.is_whitespace())
}
