//! Classification of module specifiers.
//!
//! A specifier is the literal string naming a dependency in an `import`, `export ... from` or
//! `require(...)` construct. Anything that looks like a file-system path is local; everything
//! else (npm packages, Node built-ins) is external and is never read from storage.

/// A classified specifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Reference {
  /// A path relative to the referencing file (or absolute).
  Local(String),
  /// A bare package or built-in module name.
  External(String),
}

impl Reference {
  pub fn classify(specifier: &str) -> Reference {
    if is_local_specifier(specifier) {
      Reference::Local(specifier.to_string())
    } else {
      Reference::External(specifier.to_string())
    }
  }
}

pub fn is_local_specifier(specifier: &str) -> bool {
  specifier.starts_with('/') || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Package root of a bare specifier, used for allow-list matching.
///
/// `@scope/pkg/sub` → `@scope/pkg`, `pkg/sub` → `pkg`. A `node:` scheme is kept as part of the
/// name. Returns `None` for local specifiers and malformed scoped names.
pub fn package_name(specifier: &str) -> Option<&str> {
  if is_local_specifier(specifier) {
    return None;
  }
  if specifier.is_empty() {
    return None;
  }
  if specifier.starts_with('@') {
    let mut slashes = specifier.match_indices('/').map(|(i, _)| i);
    let first = slashes.next()?;
    if first == 1 || first + 1 == specifier.len() {
      return None;
    }
    return Some(match slashes.next() {
      Some(second) => &specifier[..second],
      None => specifier,
    });
  }
  Some(specifier.split('/').next().unwrap_or(specifier))
}
