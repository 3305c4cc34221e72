//! Dependency resolution for JavaScript and TypeScript entrypoints.
//!
//! Starting from one entrypoint, [`Resolver`] walks every local file it imports (transitively),
//! checks every package it references against an [`AllowList`], and returns either the complete
//! [`FileSet`] needed to run the entrypoint elsewhere or a single [`ResolveError`] describing every
//! problem in the graph at once.
//!
//! ```
//! use deps_js::{AllowList, MemoryFs, ResolveOptions, Resolver};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new()
//!   .with_file("/checks/main.ts", "import { sum } from './math';\nimport _ from 'lodash';\n")
//!   .with_file("/checks/math.ts", "export const sum = (a: number, b: number) => a + b;\n");
//! let mut allow = AllowList::node_builtins();
//! allow.insert("lodash");
//!
//! let files = Resolver::with_fs(fs, ResolveOptions::new(allow))
//!   .resolve(Path::new("/checks/main.ts"))
//!   .unwrap();
//! assert_eq!(files.len(), 2);
//! assert!(files.contains(Path::new("/checks/math.ts")));
//! ```

pub mod allow;
pub mod collector;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod fs;
pub mod path;
pub mod resolve;
pub mod specifier;

pub use allow::AllowList;
pub use allow::NODE_BUILTINS;
pub use collector::Collector;
pub use collector::FileSet;
pub use collector::SourceFile;
pub use dialect::Dialect;
pub use error::DependencyReport;
pub use error::ResolveError;
pub use extract::extract;
pub use extract::Module;
pub use extract::ParseError;
pub use fs::MemoryFs;
pub use fs::RealFs;
pub use fs::SourceFs;
pub use resolve::resolve;
pub use resolve::ResolveOptions;
pub use resolve::Resolver;
pub use specifier::Reference;
