//! Read-only reference sequence library.

use std::collections::HashMap;
use std::path::Path;

use formetric_core::{Error, MetricSequence, ReferenceEntry, Result};

/// Lookup of precomputed golden sequences by exercise identifier.
///
/// Libraries are loaded once and never mutated afterwards, so they are
/// safe for unsynchronized concurrent reads across analysis runs.
pub trait ReferenceLibrary: Send + Sync {
    fn lookup(&self, exercise_id: &str) -> Option<MetricSequence>;

    /// Identifiers this library can serve.
    fn exercises(&self) -> Vec<String>;
}

/// In-memory library for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceLibrary {
    entries: HashMap<String, MetricSequence>,
}

impl InMemoryReferenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, exercise_id: impl Into<String>, sequence: MetricSequence) {
        self.entries.insert(exercise_id.into(), sequence);
    }
}

impl ReferenceLibrary for InMemoryReferenceLibrary {
    fn lookup(&self, exercise_id: &str) -> Option<MetricSequence> {
        self.entries.get(exercise_id).cloned()
    }

    fn exercises(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Library backed by a directory of JSON reference entries.
///
/// Every `*.json` file under the directory is parsed as one
/// [`ReferenceEntry`] at startup; the library is read-only afterwards.
#[derive(Debug)]
pub struct JsonReferenceLibrary {
    entries: HashMap<String, MetricSequence>,
}

impl JsonReferenceLibrary {
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut entries = HashMap::new();

        for dir_entry in std::fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let raw = std::fs::read_to_string(&path)?;
            let reference: ReferenceEntry = serde_json::from_str(&raw)?;
            tracing::info!(
                exercise = %reference.exercise,
                file = %path.display(),
                frames = reference.frames.len(),
                "loaded reference sequence"
            );
            entries.insert(reference.exercise.clone(), reference.to_sequence());
        }

        if entries.is_empty() {
            return Err(Error::Library(format!(
                "no reference entries under {}",
                dir.display()
            )));
        }

        Ok(Self { entries })
    }
}

impl ReferenceLibrary for JsonReferenceLibrary {
    fn lookup(&self, exercise_id: &str) -> Option<MetricSequence> {
        self.entries.get(exercise_id).cloned()
    }

    fn exercises(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}
