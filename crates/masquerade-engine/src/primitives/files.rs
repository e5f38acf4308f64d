use std::fs;
use std::path::{Path, PathBuf};

use fake::Fake;
use fake::faker::lorem::en::Paragraphs;
use rand::RngCore;

use crate::errors::{AnonymizeError, Result};

/// File operations requested by `FileSpec` fields.
pub trait FileStore: Send + Sync {
    /// Creates `directory/name[.extension]` with synthetic content and returns its path.
    fn materialize(
        &self,
        directory: &Path,
        name: &str,
        extension: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<PathBuf>;

    fn delete(&self, path: &Path) -> Result<()>;
}

/// `FileStore` backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    paragraphs: usize,
}

impl LocalFileStore {
    pub fn new(paragraphs: usize) -> Self {
        Self { paragraphs }
    }
}

impl Default for LocalFileStore {
    fn default() -> Self {
        Self::new(3)
    }
}

impl FileStore for LocalFileStore {
    fn materialize(
        &self,
        directory: &Path,
        name: &str,
        extension: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<PathBuf> {
        fs::create_dir_all(directory).map_err(|source| AnonymizeError::File {
            path: directory.to_path_buf(),
            source,
        })?;

        let path = match extension {
            Some(extension) => directory.join(format!("{name}.{extension}")),
            None => directory.join(name),
        };

        let paragraphs: Vec<String> =
            Paragraphs(self.paragraphs..self.paragraphs + 1).fake_with_rng(rng);
        fs::write(&path, paragraphs.join("\n\n")).map_err(|source| AnonymizeError::File {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| AnonymizeError::File {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension of the file referenced by `path`, without the dot.
pub fn extension_of(path: &str) -> Option<&str> {
    Path::new(path)
        .extension()
        .and_then(|extension| extension.to_str())
}
