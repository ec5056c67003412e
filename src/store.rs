//! Best-score persistence.
//!
//! The game core never touches the filesystem: it reports a beaten
//! best as `GameEvent::NewBest` and the host loop forwards the value
//! to whatever `ScoreStore` it was given.  The file-backed store keeps
//! one `key=value` line per best; tests use the in-memory fake.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::entities::BestKind;

/// Key-value port for the two persisted best scores.
///
/// Writes are fire-and-forget from the caller's perspective: `flush`
/// failures are tolerable, at worst the most recent best is lost if
/// the process dies right after.
pub trait ScoreStore {
    fn get(&self, key: BestKind) -> u32;
    fn set(&mut self, key: BestKind, value: u32);
    /// Make previous `set` calls durable.
    fn flush(&mut self) -> io::Result<()>;
}

// ── File-backed store ─────────────────────────────────────────────────────────

/// Plain-text store under the platform config directory.
pub struct FileStore {
    path: PathBuf,
    best_score: u32,
    best_items: u32,
}

impl FileStore {
    /// Open (or start) the store at the platform config location.
    pub fn open() -> io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "flappy-game").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine config directory",
            )
        })?;
        fs::create_dir_all(dirs.config_dir())?;
        Ok(Self::open_at(dirs.config_dir().join("best_scores")))
    }

    /// Open the store at an explicit path.  A missing file or a
    /// malformed value reads as a best of 0.
    pub fn open_at(path: PathBuf) -> Self {
        let mut store = FileStore {
            path,
            best_score: 0,
            best_items: 0,
        };
        if let Ok(contents) = fs::read_to_string(&store.path) {
            for line in contents.lines() {
                match line.split_once('=') {
                    Some(("score", v)) => store.best_score = v.trim().parse().unwrap_or(0),
                    Some(("items", v)) => store.best_items = v.trim().parse().unwrap_or(0),
                    _ => {}
                }
            }
        }
        store
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: BestKind) -> u32 {
        match key {
            BestKind::Score => self.best_score,
            BestKind::Items => self.best_items,
        }
    }

    fn set(&mut self, key: BestKind, value: u32) {
        match key {
            BestKind::Score => self.best_score = value,
            BestKind::Items => self.best_items = value,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        fs::write(
            &self.path,
            format!("score={}\nitems={}\n", self.best_score, self.best_items),
        )
    }
}

// ── In-memory fake ────────────────────────────────────────────────────────────

/// Test double: keeps the values in memory and counts `flush` calls so
/// tests can assert exactly how many durable writes were requested.
#[derive(Debug, Default)]
pub struct MemoryStore {
    best_score: u32,
    best_items: u32,
    flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `flush` calls seen so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: BestKind) -> u32 {
        match key {
            BestKind::Score => self.best_score,
            BestKind::Items => self.best_items,
        }
    }

    fn set(&mut self, key: BestKind, value: u32) {
        match key {
            BestKind::Score => self.best_score = value,
            BestKind::Items => self.best_items = value,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
