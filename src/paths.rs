//! Facilities for building JSON Pointer paths within schemas or validated instances.
use std::fmt::{self, Write};

/// A key within a JSON object or an index within a JSON array.
///
/// A sequence of chunks represents a path within a JSON value. Keeping indices as
/// `usize` instead of immediately stringifying them avoids allocating on every
/// array descent during validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathChunk {
    /// Property name within a JSON object.
    Property(Box<str>),
    /// Index within a JSON array.
    Index(usize),
    /// JSON Schema keyword, e.g. `"additionalProperties"`.
    Keyword(&'static str),
}

impl From<&str> for PathChunk {
    fn from(value: &str) -> Self {
        PathChunk::Property(value.into())
    }
}
impl From<String> for PathChunk {
    fn from(value: String) -> Self {
        PathChunk::Property(value.into_boxed_str())
    }
}
impl From<usize> for PathChunk {
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// An immutable, cheaply-clonable JSON Pointer, built up one chunk at a time as the
/// evaluator descends into an instance or a schema. The root path is empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonPointer(Vec<PathChunk>);

impl JsonPointer {
    pub(crate) fn root() -> Self {
        JsonPointer(Vec::new())
    }

    #[must_use]
    pub(crate) fn push(&self, chunk: impl Into<PathChunk>) -> Self {
        let mut new = self.clone();
        new.0.push(chunk.into());
        new
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a raw JSON-Pointer string (as stored on `Node::path`) back into
    /// chunks, unescaping `~1`/`~0`. Used to seed a schema-side pointer from
    /// the loader's already-escaped path before appending a keyword chunk.
    pub(crate) fn parse(path: &str) -> Self {
        if path.is_empty() {
            return JsonPointer::root();
        }
        let chunks = path
            .trim_start_matches('/')
            .split('/')
            .map(|raw| PathChunk::Property(raw.replace("~1", "/").replace("~0", "~").into()))
            .collect();
        JsonPointer(chunks)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            f.write_char('/')?;
            match chunk {
                PathChunk::Property(value) => {
                    for ch in value.chars() {
                        match ch {
                            '~' => f.write_str("~0")?,
                            '/' => f.write_str("~1")?,
                            _ => f.write_char(ch)?,
                        }
                    }
                }
                PathChunk::Index(idx) => write!(f, "{}", idx)?,
                PathChunk::Keyword(keyword) => f.write_str(keyword)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty_string() {
        assert_eq!(JsonPointer::root().to_string(), "");
    }

    #[test]
    fn escapes_tilde_and_slash() {
        let p = JsonPointer::root().push("a/b~c");
        assert_eq!(p.to_string(), "/a~1b~0c");
    }

    #[test]
    fn nested_property_and_index() {
        let p = JsonPointer::root().push("items").push(2usize);
        assert_eq!(p.to_string(), "/items/2");
    }

    #[test]
    fn parse_round_trips_an_escaped_path() {
        let p = JsonPointer::parse("/properties/a~1b");
        assert_eq!(p.to_string(), "/properties/a~1b");
    }

    #[test]
    fn parse_of_empty_string_is_root() {
        assert_eq!(JsonPointer::parse(""), JsonPointer::root());
    }
}
