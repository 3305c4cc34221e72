//! Bookkeeping for one resolution run.
//!
//! The [`Collector`] owns the visited set (which doubles as the output file set) and every
//! deferred error. Mutation is additive only; [`Collector::validate`] is the single point where
//! accumulated errors turn into a [`DependencyReport`].

use crate::dialect::Dialect;
use crate::error::DependencyReport;
use crate::error::FileParseError;
use crate::error::MissingFile;
use crate::error::UnsupportedExternals;
use crate::extract::ParseError;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

/// A file read during resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
  pub path: PathBuf,
  pub content: String,
  /// `None` for assets imported with an explicit, non-source extension (e.g. `./data.json`).
  pub dialect: Option<Dialect>,
}

impl SourceFile {
  pub fn new(path: PathBuf, content: String) -> Self {
    let dialect = Dialect::from_path(&path);
    Self {
      path,
      content,
      dialect,
    }
  }
}

/// Every file in the transitive closure of an entrypoint, keyed by path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSet {
  entrypoint: PathBuf,
  files: BTreeMap<PathBuf, SourceFile>,
}

impl FileSet {
  pub fn entrypoint(&self) -> &Path {
    &self.entrypoint
  }

  pub fn get(&self, path: &Path) -> Option<&SourceFile> {
    self.files.get(path)
  }

  pub fn content(&self, path: &Path) -> Option<&str> {
    self.get(path).map(|file| file.content.as_str())
  }

  pub fn contains(&self, path: &Path) -> bool {
    self.files.contains_key(path)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Files in path order.
  pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
    self.files.values()
  }

  pub fn paths(&self) -> impl Iterator<Item = &Path> {
    self.files.keys().map(PathBuf::as_path)
  }

  pub fn into_contents(self) -> BTreeMap<PathBuf, String> {
    self
      .files
      .into_iter()
      .map(|(path, file)| (path, file.content))
      .collect()
  }
}

/// Serialises as a `path → content` object.
impl Serialize for FileSet {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.files.len()))?;
    for (path, file) in &self.files {
      map.serialize_entry(path, &file.content)?;
    }
    map.end()
  }
}

/// State of one resolution run; never shared between runs.
#[derive(Debug)]
pub struct Collector {
  entrypoint: PathBuf,
  files: BTreeMap<PathBuf, SourceFile>,
  parse_errors: BTreeMap<PathBuf, ParseError>,
  unsupported: BTreeMap<PathBuf, BTreeSet<String>>,
  // Candidate path -> referencing files.
  missing: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
  file_limit: Option<usize>,
}

impl Collector {
  pub fn new(entrypoint: impl Into<PathBuf>) -> Self {
    Self {
      entrypoint: entrypoint.into(),
      files: BTreeMap::new(),
      parse_errors: BTreeMap::new(),
      unsupported: BTreeMap::new(),
      missing: BTreeMap::new(),
      file_limit: None,
    }
  }

  /// Returns false (and keeps the existing entry) if the path was already visited.
  pub fn add_dependency(&mut self, file: SourceFile) -> bool {
    match self.files.entry(file.path.clone()) {
      btree_map::Entry::Occupied(_) => false,
      btree_map::Entry::Vacant(slot) => {
        slot.insert(file);
        true
      }
    }
  }

  pub fn has_dependency(&self, path: &Path) -> bool {
    self.files.contains_key(path)
  }

  pub fn dependency(&self, path: &Path) -> Option<&SourceFile> {
    self.files.get(path)
  }

  pub fn dependency_count(&self) -> usize {
    self.files.len()
  }

  pub fn dependencies(&self) -> impl Iterator<Item = &SourceFile> {
    self.files.values()
  }

  /// Only the first parse error of a file is kept.
  pub fn add_parsing_error(&mut self, path: &Path, error: ParseError) {
    self.parse_errors.entry(path.to_path_buf()).or_insert(error);
  }

  pub fn add_unsupported_externals<I>(&mut self, path: &Path, names: I)
  where
    I: IntoIterator<Item = String>,
  {
    let mut names = names.into_iter().peekable();
    if names.peek().is_none() {
      return;
    }
    self
      .unsupported
      .entry(path.to_path_buf())
      .or_default()
      .extend(names);
  }

  pub fn add_missing_file(&mut self, candidate: PathBuf, referrer: &Path) {
    self
      .missing
      .entry(candidate)
      .or_default()
      .insert(referrer.to_path_buf());
  }

  pub fn add_file_limit(&mut self, limit: usize) {
    self.file_limit = Some(limit);
  }

  pub fn validate(self) -> Result<FileSet, DependencyReport> {
    let report = DependencyReport {
      entrypoint: self.entrypoint.clone(),
      parse_errors: self
        .parse_errors
        .into_iter()
        .map(|(path, err)| FileParseError {
          path,
          message: err.message,
          line: err.line,
          column: err.column,
        })
        .collect(),
      unsupported_externals: self
        .unsupported
        .into_iter()
        .map(|(path, names)| UnsupportedExternals {
          path,
          names: names.into_iter().collect(),
        })
        .collect(),
      missing_files: self
        .missing
        .into_iter()
        .map(|(path, referrers)| MissingFile {
          path,
          referenced_by: referrers.into_iter().collect(),
        })
        .collect(),
      file_limit: self.file_limit,
    };
    if !report.is_empty() {
      return Err(report);
    }
    Ok(FileSet {
      entrypoint: self.entrypoint,
      files: self.files,
    })
  }
}
