//! # Tree Paths
//!
//! A [`Path`] locates a node inside a grammar or a document as an ordered
//! list of map keys and list indexes.
//!
//! ## Rendering
//!
//! Segments are joined with `.`, except that no separator is written before
//! the first segment or before an index segment:
//!
//! | segments | rendered |
//! |---|---|
//! | `a`, `b` | `a.b` |
//! | `a`, `[0]`, `b` | `a[0].b` |
//! | `[1]` | `[1]` |
//!
//! The empty path renders as the empty string.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A map key, kept verbatim.
    Key(String),
    /// A zero-based list index, rendered as `[n]`.
    Index(usize),
}

impl PathSegment {
    /// Returns true for list index segments.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(n) => write!(f, "[{n}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered sequence of [`PathSegment`]s.
///
/// During validation a path is used as a stack: segments are pushed when
/// the walk descends and popped when it returns, so the caller always sees
/// its own path again. Violations capture a clone of the path at the point
/// of failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Create an empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns a copy of this path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Clear all segments, returning to the root.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.is_index() {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Paths serialize as their rendered string.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path(segments: &[PathSegment]) -> Path {
        segments.iter().cloned().collect()
    }

    #[test]
    fn test_render_keys_joined_with_dots() {
        let p = path(&["a".into(), "b".into()]);
        assert_eq!(p.to_string(), "a.b");
    }

    #[test]
    fn test_render_no_dot_before_index() {
        let p = path(&["a".into(), 0usize.into(), "b".into()]);
        assert_eq!(p.to_string(), "a[0].b");
    }

    #[test]
    fn test_render_leading_index() {
        let p = path(&[1usize.into()]);
        assert_eq!(p.to_string(), "[1]");
    }

    #[test]
    fn test_render_consecutive_indexes() {
        let p = path(&["m".into(), 2usize.into(), 3usize.into()]);
        assert_eq!(p.to_string(), "m[2][3]");
    }

    #[test]
    fn test_render_root_is_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_empty());
    }

    #[test]
    fn test_push_pop_restores_caller_path() {
        let mut p = path(&["map".into()]);
        let before = p.clone();
        p.push("age");
        p.push(4usize);
        assert_eq!(p.to_string(), "map.age[4]");
        p.pop();
        p.pop();
        assert_eq!(p, before);
    }

    #[test]
    fn test_child_leaves_original_untouched() {
        let p = path(&["map".into()]);
        let c = p.child("name");
        assert_eq!(p.len(), 1);
        assert_eq!(c.to_string(), "map.name");
    }

    #[test]
    fn test_serialize_as_rendered_string() {
        let p = path(&["tags".into(), 1usize.into()]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"tags[1]\"");
    }

    fn segment_strategy() -> impl Strategy<Value = PathSegment> {
        prop_oneof![
            "[a-z]{1,6}".prop_map(PathSegment::Key),
            (0usize..100).prop_map(PathSegment::Index),
        ]
    }

    proptest! {
        #[test]
        fn prop_dot_count_matches_non_leading_keys(
            segments in prop::collection::vec(segment_strategy(), 0..12)
        ) {
            let rendered = path(&segments).to_string();
            let expected_dots = segments
                .iter()
                .skip(1)
                .filter(|s| !s.is_index())
                .count();
            prop_assert_eq!(rendered.matches('.').count(), expected_dots);
        }

        #[test]
        fn prop_rendering_is_concatenation_without_dots(
            segments in prop::collection::vec(segment_strategy(), 0..12)
        ) {
            let rendered = path(&segments).to_string();
            let bare: String = segments.iter().map(|s| s.to_string()).collect();
            prop_assert_eq!(rendered.replace('.', ""), bare);
        }
    }
}
