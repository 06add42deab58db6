//! Retrieved context passages
//!
//! The council consumes already-retrieved context; retrieval itself lives
//! behind the `ContextProvider` port in the application layer.

use serde::{Deserialize, Serialize};

/// One retrieved context passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Passage text
    pub content: String,
    /// Originating document, e.g. a file name
    pub source: String,
    /// Position within the source, e.g. "para 3"
    pub locator: String,
}

impl Passage {
    pub fn new(
        content: impl Into<String>,
        source: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            locator: locator.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passage_roundtrip() {
        let p = Passage::new("text", "doc.md", "para 1");
        let json = serde_json::to_string(&p).unwrap();
        let back: Passage = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
