//! # Field Paths
//!
//! A [`FieldPath`] locates one value inside a configuration document.
//! Paths render as JSON Pointers (RFC 6901), so a diagnostic at the slug of
//! the first palette entry of the `core/button` block reads
//! `/settings/blocks/core~1button/color/palette/0/slug`.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member.
    Key(String),
    /// Array element.
    Index(usize),
}

/// Location of a value inside a document, from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path such as `settings.blocks.core/button.color.text`.
    ///
    /// Purely numeric components become array indices.
    pub fn parse_dotted(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(i) => Segment::Index(i),
                Err(_) => Segment::Key(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// The path to member `key` of the value at `self`.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// The path to element `index` of the array at `self`.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// All segments from the root.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Object keys only, in order. Array indices are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Key(k) => Some(k.as_str()),
            Segment::Index(_) => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Key(k) => write!(f, "/{}", k.replace('~', "~0").replace('/', "~1"))?,
                Segment::Index(i) => write!(f, "/{i}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_json_pointer() {
        let path = FieldPath::root()
            .key("settings")
            .key("blocks")
            .key("core/button")
            .key("color")
            .key("palette")
            .index(0)
            .key("slug");
        assert_eq!(
            path.to_string(),
            "/settings/blocks/core~1button/color/palette/0/slug"
        );
    }

    #[test]
    fn root_displays_as_slash() {
        assert_eq!(FieldPath::root().to_string(), "/");
    }

    #[test]
    fn parse_dotted_recognizes_indices() {
        let path = FieldPath::parse_dotted("settings.color.palette.2.color");
        assert_eq!(path.segments()[3], Segment::Index(2));
        assert_eq!(
            path.keys().collect::<Vec<_>>(),
            vec!["settings", "color", "palette", "color"]
        );
    }
}
