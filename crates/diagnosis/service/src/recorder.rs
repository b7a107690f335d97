//! Session recorders: where finished diagnoses are kept.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use diagnosis_engine::SessionSummary;

use crate::error::{RecorderError, RecorderResult};

/// Unique identifier for a recorded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// A stored diagnosis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub recorded_at: DateTime<Utc>,
    pub summary: SessionSummary,
}

impl SessionRecord {
    pub fn new(summary: SessionSummary) -> Self {
        Self {
            id: SessionId::generate(),
            recorded_at: Utc::now(),
            summary,
        }
    }
}

/// Persists diagnosis sessions.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    /// Store one session and return it as stored.
    async fn record_session(&self, summary: SessionSummary) -> RecorderResult<SessionRecord>;

    /// Number of sessions stored so far.
    async fn session_count(&self) -> RecorderResult<u64>;
}

/// In-memory recorder, mostly for tests and one-shot runs.
pub struct MemorySessionRecorder {
    records: RwLock<Vec<SessionRecord>>,
}

impl MemorySessionRecorder {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// All sessions in recording order.
    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.read().clone()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Default for MemorySessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRecorder for MemorySessionRecorder {
    async fn record_session(&self, summary: SessionSummary) -> RecorderResult<SessionRecord> {
        let record = SessionRecord::new(summary);
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn session_count(&self) -> RecorderResult<u64> {
        Ok(self.records.read().len() as u64)
    }
}

/// Append-only recorder writing one JSON object per line.
///
/// Lines that do not decode, such as one cut short by a failed append, are
/// skipped with a warning when the store is read.
pub struct JsonlSessionRecorder {
    path: PathBuf,
    count: AtomicU64,
    // Set when the file does not end in a newline; the next append starts one.
    needs_separator: AtomicBool,
    // Serializes appends so concurrent sessions never interleave a line.
    write_lock: Mutex<()>,
}

/// Decoded contents of a store file.
struct StoreContents {
    records: Vec<SessionRecord>,
    terminated: bool,
}

impl JsonlSessionRecorder {
    /// Open (or prepare to create) the store at `path`, counting existing records.
    pub async fn open(path: impl Into<PathBuf>) -> RecorderResult<Self> {
        let path = path.into();
        let (count, terminated) = if tokio::fs::try_exists(&path)
            .await
            .map_err(|source| io_error(&path, source))?
        {
            let contents = Self::read_store(&path).await?;
            (contents.records.len() as u64, contents.terminated)
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| io_error(&path, source))?;
            }
            (0, true)
        };
        debug!(path = %path.display(), count, "Opened session store");

        Ok(Self {
            path,
            count: AtomicU64::new(count),
            needs_separator: AtomicBool::new(!terminated),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored session back.
    pub async fn read_all(&self) -> RecorderResult<Vec<SessionRecord>> {
        if !tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| io_error(&self.path, source))?
        {
            return Ok(Vec::new());
        }
        Ok(Self::read_store(&self.path).await?.records)
    }

    async fn read_store(path: &Path) -> RecorderResult<StoreContents> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| io_error(path, source))?;
        let mut records: Vec<SessionRecord> = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(source) => {
                    let error = RecorderError::Decode {
                        path: path.to_path_buf(),
                        line: index + 1,
                        source,
                    };
                    warn!(%error, "Skipping malformed session record");
                }
            }
        }

        Ok(StoreContents {
            records,
            terminated: text.is_empty() || text.ends_with('\n'),
        })
    }

    async fn append(&self, line: &str) -> RecorderResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| io_error(&self.path, source))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| io_error(&self.path, source))?;
        file.flush()
            .await
            .map_err(|source| io_error(&self.path, source))
    }
}

#[async_trait]
impl SessionRecorder for JsonlSessionRecorder {
    async fn record_session(&self, summary: SessionSummary) -> RecorderResult<SessionRecord> {
        let record = SessionRecord::new(summary);
        let encoded = serde_json::to_string(&record).map_err(RecorderError::Encode)?;

        let _guard = self.write_lock.lock().await;
        let mut line = String::with_capacity(encoded.len() + 2);
        if self.needs_separator.swap(false, Ordering::SeqCst) {
            line.push('\n');
        }
        line.push_str(&encoded);
        line.push('\n');

        if let Err(error) = self.append(&line).await {
            // The write may have stopped mid-line.
            self.needs_separator.store(true, Ordering::SeqCst);
            return Err(error);
        }

        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn session_count(&self) -> RecorderResult<u64> {
        Ok(self.count.load(Ordering::SeqCst))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> RecorderError {
    RecorderError::Io {
        path: path.to_path_buf(),
        source,
    }
}
