use crate::path::normalize_path;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Storage abstraction for resolution so non-disk hosts and tests can supply sources.
pub trait SourceFs {
  /// Read a UTF-8 file. Directories and missing paths are errors.
  fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

impl<F: SourceFs + ?Sized> SourceFs for &F {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    (**self).read_to_string(path)
  }
}

/// Real filesystem adapter used by the CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealFs;

impl SourceFs for RealFs {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }
}

/// In-memory file system keyed by normalised path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
  files: BTreeMap<PathBuf, String>,
}

impl MemoryFs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) -> &mut Self {
    self
      .files
      .insert(normalize_path(path.as_ref()), text.into());
    self
  }

  pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
    self.insert(path, text);
    self
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

impl SourceFs for MemoryFs {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    self
      .files
      .get(&normalize_path(path))
      .cloned()
      .ok_or_else(|| {
        io::Error::new(
          io::ErrorKind::NotFound,
          format!("no such file: {}", path.display()),
        )
      })
  }
}
