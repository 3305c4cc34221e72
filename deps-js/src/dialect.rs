use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

/// Source language of a file, derived from its extension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
  Js,
  Ts,
}

impl Dialect {
  pub const fn extension(self) -> &'static str {
    match self {
      Dialect::Js => "js",
      Dialect::Ts => "ts",
    }
  }

  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext {
      "js" => Some(Dialect::Js),
      "ts" => Some(Dialect::Ts),
      _ => None,
    }
  }

  pub fn from_path(path: &Path) -> Option<Self> {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .and_then(Self::from_extension)
  }

  /// Extensions probed, in order, for an extensionless local import written in this dialect.
  ///
  /// TypeScript files may depend on plain JavaScript, but JavaScript files never silently pick up
  /// TypeScript sources.
  pub const fn probe_extensions(self) -> &'static [&'static str] {
    match self {
      Dialect::Js => &["js"],
      Dialect::Ts => &["ts", "js"],
    }
  }
}

impl Display for Dialect {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Dialect::Js => "JavaScript",
      Dialect::Ts => "TypeScript",
    })
  }
}
