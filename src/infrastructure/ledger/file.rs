//! File-backed ledger
//!
//! Persists the world state as one JSON document. Transactions are
//! serialized with an exclusive `fs2` lock on a sibling `<name>.lock` file, held
//! from `begin` until the transaction is committed or dropped. Commits
//! replace the document atomically via a temp file in the same directory.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::ports::{LedgerStub, StoreError, StoreResult, TransactionalLedger};
use crate::domain::value_objects::StateHash;

/// Current world-state document version
pub const FORMAT_VERSION: u32 = 1;

/// On-disk representation of the world state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldStateFile {
    version: u32,
    checksum: String,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    state: BTreeMap<String, String>,
}

/// Ledger stored in a single world-state file
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file name>.lock` next to the state file, never the state file itself
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Committed values, read under a shared lock
    pub fn snapshot(&self) -> StoreResult<BTreeMap<String, Vec<u8>>> {
        let lock = self.open_lock()?;
        lock.lock_shared()?;
        let result = self.load_from_disk();
        let _ = lock.unlock();

        Ok(result?
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes()))
            .collect())
    }

    fn open_lock(&self) -> StoreResult<File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;
        Ok(lock)
    }

    fn load_from_disk(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let file: WorldStateFile =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupted {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        if file.version != FORMAT_VERSION {
            return Err(StoreError::Corrupted {
                message: format!(
                    "{}: unsupported format version {} (expected {})",
                    self.path.display(),
                    file.version,
                    FORMAT_VERSION
                ),
            });
        }

        let expected = state_hash(&file.state)?;
        if StateHash::parse(&file.checksum) != expected {
            return Err(StoreError::Corrupted {
                message: format!(
                    "{}: checksum mismatch (stored {}, computed {})",
                    self.path.display(),
                    file.checksum,
                    expected
                ),
            });
        }

        Ok(file.state)
    }

    fn save_to_disk(&self, state: BTreeMap<String, String>) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file = WorldStateFile {
            version: FORMAT_VERSION,
            checksum: state_hash(&state)?.to_string(),
            updated_at: Utc::now(),
            state,
        };
        let content = serde_json::to_vec_pretty(&file).map_err(|e| StoreError::Corrupted {
            message: e.to_string(),
        })?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        tmp.write_all(&content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

fn state_hash(state: &BTreeMap<String, String>) -> StoreResult<StateHash> {
    let canonical = serde_json::to_vec(state).map_err(|e| StoreError::Corrupted {
        message: e.to_string(),
    })?;
    Ok(StateHash::from_bytes(&canonical))
}

/// One transaction against a [`FileLedger`]; holds the exclusive lock
pub struct FileTransaction {
    lock: File,
    state: BTreeMap<String, String>,
    writes: BTreeMap<String, String>,
}

impl Drop for FileTransaction {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}

impl LedgerStub for FileTransaction {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self
            .writes
            .get(key)
            .or_else(|| self.state.get(key))
            .map(|value| value.clone().into_bytes()))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        let value = String::from_utf8(value).map_err(|_| StoreError::Rejected {
            key: key.to_string(),
            reason: "value is not UTF-8".to_string(),
        })?;
        self.writes.insert(key.to_string(), value);
        Ok(())
    }
}

impl TransactionalLedger for FileLedger {
    type Transaction = FileTransaction;

    /// Blocks until no other transaction holds the lock
    fn begin(&self) -> StoreResult<FileTransaction> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()?;

        // On error the lock file is dropped, which releases the lock
        let state = self.load_from_disk()?;
        Ok(FileTransaction {
            lock,
            state,
            writes: BTreeMap::new(),
        })
    }

    fn commit(&self, mut tx: FileTransaction) -> StoreResult<()> {
        if tx.writes.is_empty() {
            return Ok(());
        }

        let mut state = std::mem::take(&mut tx.state);
        state.append(&mut tx.writes);
        self.save_to_disk(state)
    }
}
