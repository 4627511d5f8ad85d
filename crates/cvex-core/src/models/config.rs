//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for cvex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CvexConfig {
    /// Completion service configuration.
    pub llm: LlmConfig,

    /// Tabular ingestion configuration.
    pub table: TableConfig,
}

impl Default for CvexConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            table: TableConfig::default(),
        }
    }
}

/// Completion service configuration.
///
/// The credential is deliberately not part of the configuration; it is
/// supplied per session and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Tabular ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Name of the column holding resume text.
    pub text_column: String,

    /// Upper bound on rows processed per operation.
    pub max_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            text_column: "Resume_str".to_string(),
            max_rows: 20,
        }
    }
}

impl CvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CvexConfig::default();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.table.text_column, "Resume_str");
        assert_eq!(config.table.max_rows, 20);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CvexConfig::default();
        config.llm.model = "gpt-4o-mini".to_string();
        config.table.max_rows = 50;
        config.save(&path).unwrap();

        let loaded = CvexConfig::from_file(&path).unwrap();
        assert_eq!(loaded.llm.model, "gpt-4o-mini");
        assert_eq!(loaded.table.max_rows, 50);
        // Untouched fields keep their defaults.
        assert_eq!(loaded.llm.timeout_secs, 120);
    }
}
