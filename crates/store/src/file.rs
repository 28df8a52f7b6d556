//! JSON file-backed ordered score store with atomic writes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use rankline_primitives::UserId;
use tracing::{debug, warn};

use super::{MemoryScoreStore, OrderedScoreStore, ScoreStoreError, ScoredMember};

/// JSON file store. Loaded to memory on open, written back on flush.
///
/// The file holds one object mapping each set key to its members in rank
/// order. Only one process should open a given file at a time. Rank queries
/// run on a [`MemoryScoreStore`] and share its O(n) rank and range cost.
pub struct FileScoreStore {
    path: PathBuf,
    sets: MemoryScoreStore,
    dirty: Mutex<bool>,
}

impl FileScoreStore {
    /// Load existing file or create empty store.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ScoreStoreError> {
        let path = path.into();
        let sets = if path.exists() {
            MemoryScoreStore::from_snapshot(Self::load_from_file(&path)?)
        } else {
            MemoryScoreStore::new()
        };

        Ok(Self {
            path,
            sets,
            dirty: Mutex::new(false),
        })
    }

    /// Create store, making parent directories if needed.
    pub fn new_with_create_dir(path: impl Into<PathBuf>) -> Result<Self, ScoreStoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::new(path)
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<String, Vec<ScoredMember>>, ScoreStoreError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let snapshot: BTreeMap<String, Vec<ScoredMember>> = serde_json::from_reader(reader)
            .map_err(|e| ScoreStoreError::Serialization(e.to_string()))?;

        debug!(path = %path.display(), sets = snapshot.len(), "loaded score store");
        Ok(snapshot)
    }

    fn save_to_file(&self) -> Result<(), ScoreStoreError> {
        let snapshot = self.sets.snapshot();

        // Write to temp file first, then rename (atomic)
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &snapshot)
                .map_err(|e| ScoreStoreError::Serialization(e.to_string()))?;
        }

        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), sets = snapshot.len(), "saved score store");
        Ok(())
    }

    fn mark_dirty(&self) {
        *self.dirty.lock() = true;
    }

    pub fn is_dirty(&self) -> bool {
        *self.dirty.lock()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory working set.
    pub fn sets(&self) -> &MemoryScoreStore {
        &self.sets
    }
}

#[async_trait]
impl OrderedScoreStore for FileScoreStore {
    async fn upsert(
        &self,
        set_key: &str,
        member: UserId,
        score: i64,
    ) -> Result<(), ScoreStoreError> {
        self.sets.upsert(set_key, member, score).await?;
        self.mark_dirty();
        Ok(())
    }

    async fn score(&self, set_key: &str, member: UserId) -> Result<Option<i64>, ScoreStoreError> {
        self.sets.score(set_key, member).await
    }

    async fn reverse_rank(
        &self,
        set_key: &str,
        member: UserId,
    ) -> Result<Option<u64>, ScoreStoreError> {
        self.sets.reverse_rank(set_key, member).await
    }

    async fn reverse_range_with_scores(
        &self,
        set_key: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<ScoredMember>, ScoreStoreError> {
        self.sets
            .reverse_range_with_scores(set_key, start, end)
            .await
    }

    async fn flush(&self) -> Result<(), ScoreStoreError> {
        let mut dirty = self.dirty.lock();
        if *dirty {
            self.save_to_file()?;
            *dirty = false;
        }
        Ok(())
    }
}

impl Drop for FileScoreStore {
    fn drop(&mut self) {
        if self.is_dirty()
            && let Err(err) = self.save_to_file()
        {
            warn!(%err, path = %self.path.display(), "failed to save score store on drop");
        }
    }
}
