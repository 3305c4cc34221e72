use crate::specifier::package_name;
use ahash::HashSet;
use ahash::HashSetExt;

/// Node.js built-in modules available in the execution environment.
pub const NODE_BUILTINS: &[&str] = &[
  "assert",
  "assert/strict",
  "async_hooks",
  "buffer",
  "child_process",
  "cluster",
  "console",
  "constants",
  "crypto",
  "dgram",
  "diagnostics_channel",
  "dns",
  "dns/promises",
  "domain",
  "events",
  "fs",
  "fs/promises",
  "http",
  "http2",
  "https",
  "inspector",
  "module",
  "net",
  "os",
  "path",
  "path/posix",
  "path/win32",
  "perf_hooks",
  "process",
  "punycode",
  "querystring",
  "readline",
  "readline/promises",
  "repl",
  "stream",
  "stream/consumers",
  "stream/promises",
  "stream/web",
  "string_decoder",
  "sys",
  "timers",
  "timers/promises",
  "tls",
  "trace_events",
  "tty",
  "url",
  "util",
  "util/types",
  "v8",
  "vm",
  "wasi",
  "worker_threads",
  "zlib",
];

/// External module names the target runtime provides.
///
/// A specifier is allowed if it is listed verbatim, or if its package root is (so allowing
/// `lodash` also allows `lodash/fp`). The `node:` scheme names built-ins only: `node:fs` is allowed
/// when `fs` is, but `node:lodash` never is.
#[derive(Clone, Debug, Default)]
pub struct AllowList {
  names: HashSet<String>,
}

impl AllowList {
  pub fn new() -> Self {
    Self {
      names: HashSet::new(),
    }
  }

  pub fn node_builtins() -> Self {
    NODE_BUILTINS.iter().copied().collect()
  }

  pub fn insert(&mut self, name: impl Into<String>) -> bool {
    self.names.insert(name.into())
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn contains(&self, specifier: &str) -> bool {
    if self.names.contains(specifier) {
      return true;
    }
    if let Some(bare) = specifier.strip_prefix("node:") {
      return package_name(bare).is_some_and(|root| {
        is_node_builtin(root) && (self.names.contains(bare) || self.names.contains(root))
      });
    }
    package_name(specifier).is_some_and(|root| self.names.contains(root))
  }
}

fn is_node_builtin(name: &str) -> bool {
  NODE_BUILTINS.contains(&name)
}

impl<S: Into<String>> FromIterator<S> for AllowList {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    let mut list = AllowList::new();
    list.extend(iter);
    list
  }
}

impl<S: Into<String>> Extend<S> for AllowList {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    self.names.extend(iter.into_iter().map(Into::into));
  }
}

#[cfg(test)]
mod tests {
  use super::AllowList;

  #[test]
  fn builtins_match_with_and_without_node_prefix() {
    let allow = AllowList::node_builtins();
    assert!(allow.contains("fs"));
    assert!(allow.contains("node:fs"));
    assert!(allow.contains("fs/promises"));
    assert!(allow.contains("node:stream/web"));
    assert!(!allow.contains("lodash"));
  }

  #[test]
  fn node_scheme_is_reserved_for_builtins() {
    let mut allow = AllowList::node_builtins();
    allow.insert("lodash");
    assert!(allow.contains("lodash/fp"));
    assert!(!allow.contains("node:lodash"));
    assert!(!allow.contains("node:lodash/fp"));
    assert!(!allow.contains("node:"));

    let without_builtins: AllowList = ["lodash"].into_iter().collect();
    assert!(!without_builtins.contains("node:fs"));
  }

  #[test]
  fn packages_match_by_root() {
    let allow: AllowList = ["lodash", "@playwright/test"].into_iter().collect();
    assert!(allow.contains("lodash"));
    assert!(allow.contains("lodash/fp"));
    assert!(allow.contains("@playwright/test"));
    assert!(allow.contains("@playwright/test/reporter"));
    assert!(!allow.contains("@playwright/other"));
    assert!(!allow.contains("lodash-es"));
    assert!(!allow.contains("fs"));
  }

  #[test]
  fn extend_merges_caller_names_into_builtins() {
    let mut allow = AllowList::node_builtins();
    let before = allow.len();
    allow.extend(["axios".to_string()]);
    assert_eq!(allow.len(), before + 1);
    assert!(allow.contains("axios"));
    assert!(!AllowList::new().contains("axios"));
  }
}
