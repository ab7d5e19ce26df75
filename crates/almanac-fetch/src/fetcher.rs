//! Content origins.

use std::hash::BuildHasherDefault;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Retrieves raw source bytes by relative path.
///
/// Paths use `/` separators and are relative to the origin. `Ok(None)` means
/// the source does not exist, which callers treat as an expected outcome.
/// Fetchers are shared across the threads of a fetch wave.
pub trait Fetch: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Short description of the origin for diagnostics.
    fn describe(&self) -> String {
        String::from("<origin>")
    }
}

/// Reads sources from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl Fetch for DirectoryFetcher {
    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.resolve(path)?;
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Serves sources from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: FxHashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a source.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.into(), bytes.into());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }

    fn describe(&self) -> String {
        format!("<memory: {} sources>", self.files.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fetcher() {
        let mut fetcher = MemoryFetcher::new().with("data/drops.ini", "1 = 1,1,1,1");
        assert_eq!(fetcher.fetch("data/drops.ini").unwrap().unwrap(), b"1 = 1,1,1,1");
        assert!(fetcher.fetch("data/shops.ini").unwrap().is_none());

        fetcher.remove("data/drops.ini");
        assert!(fetcher.is_empty());
    }

    #[test]
    fn test_directory_fetcher() {
        let root = std::env::temp_dir().join(format!("almanac-fetch-test-{}", std::process::id()));
        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::write(root.join("data/pets.ini"), b"5 = {7}").unwrap();

        let fetcher = DirectoryFetcher::new(&root);
        assert_eq!(fetcher.fetch("data/pets.ini").unwrap().unwrap(), b"5 = {7}");
        assert!(fetcher.fetch("data/missing.ini").unwrap().is_none());
        assert!(fetcher.fetch("maps/00001.emf").unwrap().is_none());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_directory_fetcher_rejects_escaping_paths() {
        let fetcher = DirectoryFetcher::new("/srv/eo");
        assert!(matches!(fetcher.fetch("../etc/passwd"), Err(Error::InvalidPath(_))));
        assert!(matches!(fetcher.fetch("/etc/passwd"), Err(Error::InvalidPath(_))));
    }
}
