use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Errors produced by [`crate::Resolver::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
  /// The entrypoint's extension names neither supported dialect.
  #[error("unsupported entrypoint {}: only .js and .ts files can be resolved", .path.display())]
  UnsupportedEntrypoint { path: PathBuf },

  /// The entrypoint does not exist or cannot be read.
  #[error("cannot read entrypoint {}: {source}", .path.display())]
  UnreadableEntrypoint {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Every problem found while walking the dependency graph.
  #[error(transparent)]
  Dependencies(#[from] DependencyReport),
}

impl ResolveError {
  pub fn entrypoint(&self) -> &Path {
    match self {
      ResolveError::UnsupportedEntrypoint { path }
      | ResolveError::UnreadableEntrypoint { path, .. } => path,
      ResolveError::Dependencies(report) => &report.entrypoint,
    }
  }

  pub fn report(&self) -> Option<&DependencyReport> {
    match self {
      ResolveError::Dependencies(report) => Some(report),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileParseError {
  pub path: PathBuf,
  pub message: String,
  pub line: usize,
  pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnsupportedExternals {
  pub path: PathBuf,
  pub names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFile {
  /// Candidate path before extension probing.
  pub path: PathBuf,
  pub referenced_by: Vec<PathBuf>,
}

/// Aggregated failure of one resolution run. All lists are sorted by path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
  pub entrypoint: PathBuf,
  pub parse_errors: Vec<FileParseError>,
  pub unsupported_externals: Vec<UnsupportedExternals>,
  pub missing_files: Vec<MissingFile>,
  /// Set when the configured file ceiling stopped the traversal.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_limit: Option<usize>,
}

impl DependencyReport {
  pub fn is_empty(&self) -> bool {
    self.parse_errors.is_empty()
      && self.unsupported_externals.is_empty()
      && self.missing_files.is_empty()
      && self.file_limit.is_none()
  }

  pub fn error_count(&self) -> usize {
    self.parse_errors.len()
      + self.unsupported_externals.len()
      + self.missing_files.len()
      + usize::from(self.file_limit.is_some())
  }
}

impl Display for DependencyReport {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "failed to resolve dependencies of {}",
      self.entrypoint.display()
    )?;
    for err in &self.parse_errors {
      write!(
        f,
        "\n  parse error in {}: {} ({}:{})",
        err.path.display(),
        err.message,
        err.line,
        err.column
      )?;
    }
    for unsupported in &self.unsupported_externals {
      write!(
        f,
        "\n  unsupported dependencies in {}: {}",
        unsupported.path.display(),
        unsupported.names.join(", ")
      )?;
    }
    for missing in &self.missing_files {
      write!(f, "\n  missing file {}", missing.path.display())?;
      if !missing.referenced_by.is_empty() {
        let referrers: Vec<_> = missing
          .referenced_by
          .iter()
          .map(|p| p.display().to_string())
          .collect();
        write!(f, " (imported from {})", referrers.join(", "))?;
      }
    }
    if let Some(limit) = self.file_limit {
      write!(f, "\n  more than {limit} files are reachable from the entrypoint")?;
    }
    Ok(())
  }
}

impl std::error::Error for DependencyReport {}
