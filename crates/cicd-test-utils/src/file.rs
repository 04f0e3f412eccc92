//! [`ServiceFile`]: a service description on disk.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A service description written into its own temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct ServiceFile {
    temp_dir: TempDir,
    path: PathBuf,
}

impl ServiceFile {
    /// Write `service` as `serverless.yml`.
    pub fn yaml(service: &Value) -> Self {
        let content = serde_yaml::to_string(service).unwrap();
        Self::raw("serverless.yml", &content)
    }

    /// Write `service` as `serverless.json`.
    pub fn json(service: &Value) -> Self {
        let content = serde_json::to_string_pretty(service).unwrap();
        Self::raw("serverless.json", &content)
    }

    /// Write arbitrary content under `file_name`.
    pub fn raw(file_name: &str, content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    /// Path of the written file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
