//! Lexical path handling for local specifiers.
//!
//! Nothing here touches the file system: candidates are computed purely from the referencing
//! file's path and the specifier, so resolution behaves identically over [`crate::fs::RealFs`] and
//! [`crate::fs::MemoryFs`].

use std::ffi::OsString;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Normalise a path lexically.
///
/// - `.` segments are removed
/// - `..` pops a segment, but never escapes the root of an absolute path
/// - leading `..` segments of a relative path are preserved
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
      Component::CurDir => {}
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => normalized.push(".."),
      },
      Component::Normal(part) => normalized.push(part),
    }
  }
  if normalized.as_os_str().is_empty() {
    normalized.push(".");
  }
  normalized
}

/// Path a local specifier points at, before any extension probing.
pub fn candidate_path(referrer: &Path, specifier: &str) -> PathBuf {
  let base_dir = referrer.parent().unwrap_or_else(|| Path::new(""));
  normalize_path(&base_dir.join(specifier))
}

pub fn has_extension(path: &Path) -> bool {
  path.extension().is_some()
}

/// Append `.ext` to the final component. Unlike [`Path::with_extension`], this never replaces an
/// existing dotted suffix.
pub fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
  let mut raw: OsString = path.as_os_str().to_owned();
  raw.push(".");
  raw.push(ext);
  PathBuf::from(raw)
}
