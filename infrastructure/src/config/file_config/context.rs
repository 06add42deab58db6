//! Context retrieval settings from TOML (`[context]` section)

use serde::{Deserialize, Serialize};

/// Context provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    /// Directory of .txt/.md documents; no directory means no context
    pub docs_dir: Option<String>,
    /// Maximum passages handed to each expert
    pub max_passages: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            max_passages: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_docs_dir() {
        let config = FileContextConfig::default();
        assert!(config.docs_dir.is_none());
        assert_eq!(config.max_passages, 4);
    }
}
