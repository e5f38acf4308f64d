use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use rand::RngCore;

use crate::errors::{AnonymizeError, Result};
use crate::primitives::pick;

/// Reads line-oriented source files once and serves random lines from memory.
#[derive(Debug, Default)]
pub struct LineSource {
    cache: RwLock<BTreeMap<PathBuf, Arc<Vec<String>>>>,
}

impl LineSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty, trimmed lines of the file at `path`.
    pub fn load_lines(&self, path: &Path) -> Result<Arc<Vec<String>>> {
        if let Some(lines) = self.cached(path) {
            return Ok(lines);
        }

        let contents = fs::read_to_string(path).map_err(|source| AnonymizeError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let lines: Vec<String> = contents
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        let lines = Arc::new(lines);

        let mut cache = self
            .cache
            .write()
            .map_err(|_| AnonymizeError::Configuration("line cache poisoned".to_string()))?;
        cache.insert(path.to_path_buf(), Arc::clone(&lines));

        Ok(lines)
    }

    pub fn random_line(&self, path: &Path, rng: &mut dyn RngCore) -> Result<String> {
        let lines = self.load_lines(path)?;
        pick(rng, &lines).cloned().ok_or_else(|| {
            AnonymizeError::Configuration(format!("file {} has no usable lines", path.display()))
        })
    }

    fn cached(&self, path: &Path) -> Option<Arc<Vec<String>>> {
        let cache = self.cache.read().ok()?;
        cache.get(path).cloned()
    }
}

/// Process-wide line source shared by every anonymizer.
pub fn line_source() -> &'static LineSource {
    static SOURCE: OnceLock<LineSource> = OnceLock::new();
    SOURCE.get_or_init(LineSource::new)
}
