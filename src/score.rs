//! Best-score persistence.
//!
//! The store keeps the best score in memory and mirrors it to a [`ScoreBackend`]. Backend
//! failures are logged and otherwise ignored, so a missing or read-only disk only costs the
//! player their record between sessions.

use log::{error, info, warn};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Durable storage for a single decimal value.
pub trait ScoreBackend {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&mut self, value: &str) -> io::Result<()>;
}

#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }
}

impl ScoreBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        fs::write(&self.path, value)
    }
}

/// Ephemeral backend. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        MemoryBackend {
            slot: Rc::new(RefCell::new(Some(value.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ScoreBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// Negative, non-numeric or empty text all read as 0.
pub fn parse_score(text: &str) -> u32 {
    match text.trim().parse::<i64>() {
        Ok(n) if n >= 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 0,
    }
}

pub struct HighScoreStore {
    backend: Box<dyn ScoreBackend>,
    best: u32,
}

impl HighScoreStore {
    /// Reads the stored best score, falling back to 0.
    pub fn load(backend: Box<dyn ScoreBackend>) -> Self {
        let best = match backend.read() {
            Ok(Some(text)) => parse_score(&text),
            Ok(None) => 0,
            Err(e) => {
                error!("Error loading high score: {}", e);
                0
            }
        };
        info!("Loaded high score {}", best);
        HighScoreStore { backend, best }
    }

    /// A store that never touches durable storage.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryBackend::new()))
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records `candidate` if it beats the current best and returns the best score.
    pub fn commit(&mut self, candidate: u32) -> u32 {
        if candidate > self.best {
            self.best = candidate;
            info!("New high score {}", candidate);
            if let Err(e) = self.backend.write(&candidate.to_string()) {
                warn!("Error saving high score, keeping it in memory: {}", e);
            }
        }
        self.best
    }
}
