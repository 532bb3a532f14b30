//! Real JSON store implementation
//!
//! Keeps the whole snapshot in one pretty-printed JSON document. Writes go to a
//! sibling temporary file which is then renamed over the document, so a crash
//! mid-write never leaves a truncated snapshot behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{EngineError, EngineResult};
use crate::traits::StoreGateway;
use shared::{Snapshot, process_debug};

/// Default location of the snapshot document
pub const DEFAULT_DATA_FILE: &str = "./data/timetable.json";

/// File-backed store gateway
pub struct RealJsonStore {
    path: PathBuf,
}

impl RealJsonStore {
    /// Store at the default location
    pub fn new() -> Self {
        Self::with_path(DEFAULT_DATA_FILE)
    }

    /// Store at a custom location
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "timetable.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for RealJsonStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreGateway for RealJsonStore {
    async fn load(&self) -> EngineResult<Option<Snapshot>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(EngineError::gateway("load", e)),
        };

        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            EngineError::malformed(format!("{}: {}", self.path.display(), e))
        })?;

        process_debug!(
            shared::ProcessId::current(),
            "📂 Loaded snapshot from {} ({})",
            self.path.display(),
            snapshot.summary()
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &Snapshot) -> EngineResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| EngineError::gateway("save", e))?;
        }

        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| EngineError::gateway("save", e))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| EngineError::gateway("save", e))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| EngineError::gateway("save", e))?;
        file.sync_all()
            .await
            .map_err(|e| EngineError::gateway("save", e))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| EngineError::gateway("save", e))?;

        process_debug!(
            shared::ProcessId::current(),
            "💾 Saved snapshot to {} ({})",
            self.path.display(),
            snapshot.summary()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
