//! File-based context provider
//!
//! Loads `.txt` and `.md` documents from a directory, splits them into
//! paragraph passages, and ranks passages by token overlap with the
//! query. This honors the retrieval contract (query in, ordered passages
//! out) without an embedding store; callers that need semantic retrieval
//! can swap in a different `ContextProvider` adapter.

use async_trait::async_trait;
use council_application::ports::context_provider::{ContextError, ContextProvider};
use council_domain::Passage;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Context provider over a directory of plain-text documents
pub struct FileContextProvider {
    docs_dir: PathBuf,
    max_passages: usize,
}

impl FileContextProvider {
    pub fn new(docs_dir: impl Into<PathBuf>, max_passages: usize) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            max_passages: max_passages.max(1),
        }
    }

    /// Split a document into paragraph passages with 1-based locators
    fn split_passages(source: &str, text: &str) -> Vec<Passage> {
        text.split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .enumerate()
            .map(|(i, p)| Passage::new(p, source, format!("para {}", i + 1)))
            .collect()
    }

    fn tokenize(text: &str) -> BTreeSet<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() > 2)
            .map(str::to_string)
            .collect()
    }

    /// Token-overlap score between query and passage
    fn overlap(query_tokens: &BTreeSet<String>, passage: &Passage) -> usize {
        let passage_tokens = Self::tokenize(&passage.content);
        query_tokens.intersection(&passage_tokens).count()
    }

    fn is_document(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("txt") | Some("md")
        )
    }

    fn load_passages(&self) -> Result<Vec<Passage>, ContextError> {
        let entries = std::fs::read_dir(&self.docs_dir)
            .map_err(|e| ContextError::Unavailable(format!("{}: {}", self.docs_dir.display(), e)))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| Self::is_document(path))
            .collect();
        files.sort();

        let mut passages = Vec::new();
        for path in files {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ContextError::RetrievalFailed(format!("{}: {}", path.display(), e)))?;
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            passages.extend(Self::split_passages(&source, &text));
        }
        Ok(passages)
    }
}

#[async_trait]
impl ContextProvider for FileContextProvider {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, ContextError> {
        let passages = self.load_passages()?;
        let query_tokens = Self::tokenize(query);

        let mut scored: Vec<(usize, Passage)> = passages
            .into_iter()
            .map(|p| (Self::overlap(&query_tokens, &p), p))
            .collect();
        // Stable sort keeps document order among equally-scored passages
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let top: Vec<Passage> = scored
            .into_iter()
            .take(self.max_passages)
            .map(|(_, p)| p)
            .collect();

        debug!(
            "Retrieved {} passages from {}",
            top.len(),
            self.docs_dir.display()
        );
        Ok(top)
    }
}
