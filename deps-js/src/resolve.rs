//! Breadth-first traversal of the local file graph.

use crate::allow::AllowList;
use crate::collector::Collector;
use crate::collector::FileSet;
use crate::collector::SourceFile;
use crate::dialect::Dialect;
use crate::error::ResolveError;
use crate::extract::extract;
use crate::fs::RealFs;
use crate::fs::SourceFs;
use crate::path::candidate_path;
use crate::path::has_extension;
use crate::path::normalize_path;
use crate::path::with_appended_extension;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::debug_span;
use tracing::trace;

/// Options controlling a resolution run.
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
  /// External names the target runtime provides (built-ins and permitted packages).
  pub allow: AllowList,
  /// Maximum number of files in the result, entrypoint included. `None` is unbounded.
  pub max_files: Option<NonZeroUsize>,
}

impl ResolveOptions {
  pub fn new(allow: AllowList) -> Self {
    Self {
      allow,
      max_files: None,
    }
  }

  pub fn with_max_files(mut self, max_files: NonZeroUsize) -> Self {
    self.max_files = Some(max_files);
    self
  }
}

enum Lookup {
  Visited,
  Found(PathBuf, String),
  Missing,
}

/// Resolves the dependency closure of an entrypoint.
///
/// Each call to [`Resolver::resolve`] builds its own [`Collector`], so one resolver may serve
/// concurrent runs as long as its file system does.
#[derive(Clone, Debug)]
pub struct Resolver<F = RealFs> {
  fs: F,
  options: ResolveOptions,
}

impl Resolver<RealFs> {
  /// Construct a resolver that reads from disk.
  pub fn new(options: ResolveOptions) -> Self {
    Self { fs: RealFs, options }
  }
}

impl<F: SourceFs> Resolver<F> {
  /// Construct a resolver with a custom file system implementation.
  pub fn with_fs(fs: F, options: ResolveOptions) -> Self {
    Self { fs, options }
  }

  /// Only an unsupported or unreadable entrypoint fails immediately; every other problem is
  /// collected and reported together once the traversal is complete.
  pub fn resolve(&self, entrypoint: &Path) -> Result<FileSet, ResolveError> {
    let entrypoint = normalize_path(entrypoint);
    let span = debug_span!("resolve_dependencies", entrypoint = %entrypoint.display());
    let _enter = span.enter();

    if Dialect::from_path(&entrypoint).is_none() {
      return Err(ResolveError::UnsupportedEntrypoint { path: entrypoint });
    }
    let content = match self.fs.read_to_string(&entrypoint) {
      Ok(content) => content,
      Err(source) => {
        return Err(ResolveError::UnreadableEntrypoint {
          path: entrypoint,
          source,
        })
      }
    };

    let mut collector = Collector::new(entrypoint.clone());
    collector.add_dependency(SourceFile::new(entrypoint.clone(), content));
    let mut queue = VecDeque::from([entrypoint]);

    while let Some(path) = queue.pop_front() {
      let Some(file) = collector.dependency(&path) else {
        continue;
      };
      // Assets such as JSON are shipped as-is.
      let Some(dialect) = file.dialect else {
        continue;
      };
      let module = match extract(&file.content, dialect) {
        Ok(module) => module,
        Err(err) => {
          debug!(path = %path.display(), error = %err, "parse error");
          collector.add_parsing_error(&path, err);
          continue;
        }
      };

      let unsupported: Vec<String> = module
        .external
        .into_iter()
        .filter(|name| !self.options.allow.contains(name))
        .collect();
      if !unsupported.is_empty() {
        debug!(path = %path.display(), names = ?unsupported, "unsupported external dependencies");
      }
      collector.add_unsupported_externals(&path, unsupported);

      for specifier in &module.local {
        let candidate = candidate_path(&path, specifier);
        match self.lookup(&collector, &candidate, dialect) {
          Lookup::Visited => {}
          Lookup::Missing => {
            debug!(from = %path.display(), candidate = %candidate.display(), "missing local file");
            collector.add_missing_file(candidate, &path);
          }
          Lookup::Found(resolved, content) => {
            if let Some(limit) = self.options.max_files.map(NonZeroUsize::get) {
              if collector.dependency_count() >= limit {
                debug!(limit, path = %resolved.display(), "file limit reached");
                collector.add_file_limit(limit);
                continue;
              }
            }
            trace!(from = %path.display(), path = %resolved.display(), "enqueue");
            collector.add_dependency(SourceFile::new(resolved.clone(), content));
            queue.push_back(resolved);
          }
        }
      }
    }

    debug!(files = collector.dependency_count(), "traversal complete");
    collector.validate().map_err(ResolveError::Dependencies)
  }

  /// An explicit extension is read verbatim; otherwise the referencing dialect's extensions are
  /// probed in order.
  fn lookup(&self, collector: &Collector, candidate: &Path, dialect: Dialect) -> Lookup {
    let probes: Vec<PathBuf> = if has_extension(candidate) {
      vec![candidate.to_path_buf()]
    } else {
      dialect
        .probe_extensions()
        .iter()
        .map(|ext| with_appended_extension(candidate, ext))
        .collect()
    };
    for probe in probes {
      if collector.has_dependency(&probe) {
        return Lookup::Visited;
      }
      if let Ok(content) = self.fs.read_to_string(&probe) {
        return Lookup::Found(probe, content);
      }
    }
    Lookup::Missing
  }
}

/// Resolve `entrypoint` from disk against `allow`.
pub fn resolve(entrypoint: &Path, allow: AllowList) -> Result<FileSet, ResolveError> {
  Resolver::new(ResolveOptions::new(allow)).resolve(entrypoint)
}
