use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;

/// The key under which the derived image reference is stored.
pub const IMAGE_KEY: &str = "Image";

/// An ordered, flat mapping of field name to field value.
///
/// Keys are unique. Insertion order is preserved so that the serialized JSON is
/// deterministic; re-inserting an existing key replaces its value in place.
/// A record produced by [`extract`](crate::extract) always holds the
/// [`IMAGE_KEY`] field.
///
/// Records are only built by extraction; there is no public way to create an
/// empty one:
///
/// ```compile_fail
/// let record = rdescribe::FieldRecord::default();
/// ```
///
/// ```compile_fail
/// let record = rdescribe::FieldRecord::new();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    fields: Vec<(String, String)>,
}

impl FieldRecord {
    pub(crate) fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert or replace a field. Returns the previous value, if any.
    pub(crate) fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The derived `../../upload/<filename>` reference.
    pub fn image(&self) -> Option<&str> {
        self.get(IMAGE_KEY)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize the record as a single-line JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for FieldRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl IntoIterator for FieldRecord {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = FieldRecord::new();
        record.insert("Title", "First");
        record.insert("Style", "Modern");
        let previous = record.insert("Title", "Second");

        assert_eq!(previous.as_deref(), Some("First"));
        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Title", "Style"]);
        assert_eq!(record.get("Title"), Some("Second"));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut record = FieldRecord::new();
        record.insert(IMAGE_KEY, "../../upload/a.png");
        record.insert("Title", "Lamp \"Aurora\"");
        record.insert("Keywords", "lamp, light");

        let json = record.to_json().expect("record should serialize");
        assert_eq!(
            json,
            r#"{"Image":"../../upload/a.png","Title":"Lamp \"Aurora\"","Keywords":"lamp, light"}"#
        );
    }
}
