//! Configuration for the persistence layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the file-backed team store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Base directory for persistence files
    pub data_dir: PathBuf,

    /// Name of the snapshot file inside `data_dir`
    pub file_name: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data"), file_name: "my_team.json".to_string() }
    }
}

impl PersistenceConfig {
    /// Create a new configuration with custom data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Default::default() }
    }

    /// Full path of the snapshot file
    pub fn team_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.file_name.trim().is_empty() {
            return Err("file_name must not be empty".to_string());
        }

        if self.file_name.contains(['/', '\\']) {
            return Err(format!("file_name must be a bare file name, got '{}'", self.file_name));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_team_file() {
        let config = PersistenceConfig::default();
        assert_eq!(config.team_file(), PathBuf::from("./data/my_team.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nested_file_name() {
        let config =
            PersistenceConfig { file_name: "nested/team.json".to_string(), ..Default::default() };
        assert!(config.validate().is_err());

        let empty = PersistenceConfig { file_name: " ".to_string(), ..Default::default() };
        assert!(empty.validate().is_err());
    }
}
