//! Ollama endpoint settings from TOML (`[ollama]` section)

use serde::{Deserialize, Serialize};

/// Ollama gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            FileOllamaConfig::default().base_url,
            "http://localhost:11434"
        );
    }
}
