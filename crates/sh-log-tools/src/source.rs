//! Where log lines come from: the local filesystem or an in-memory mock.

use async_trait::async_trait;

use crate::error::{LogError, LogResult};

/// Abstraction for reading log data.
///
/// Parsers only ever see lines, which keeps them testable against
/// `MockLogSource` without touching the filesystem.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read all lines from the given path.
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>>;

    /// List the regular files directly inside `dir`, sorted by name.
    async fn list_dir(&self, dir: &str) -> LogResult<Vec<String>>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

fn map_io_error(path: &str, e: std::io::Error) -> LogError {
    if e.kind() == std::io::ErrorKind::NotFound {
        LogError::NotFound(path.to_string())
    } else {
        LogError::Io(format!("{path}: {e}"))
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| map_io_error(path, e))?;
        // Lossy: URLs in proxy logs are not guaranteed to be UTF-8.
        let content = String::from_utf8_lossy(&bytes);
        Ok(content.lines().map(String::from).collect())
    }

    async fn list_dir(&self, dir: &str) -> LogResult<Vec<String>> {
        let mut rd = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| map_io_error(dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = rd.next_entry().await.map_err(|e| map_io_error(dir, e))? {
            let file_type = entry.file_type().await.map_err(|e| map_io_error(dir, e))?;
            if file_type.is_dir() {
                continue;
            }
            files.push(entry.path().to_string_lossy().into_owned());
        }
        files.sort();
        Ok(files)
    }
}
