mod config;

use clap::{Args, Parser, Subcommand};
use config::{load_config, Config};
use deps_js::{DependencyReport, FileSet, ResolveError, Resolver};
use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(author, version, about = "JavaScript/TypeScript dependency resolution CLI")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve every file and package an entrypoint depends on.
  Resolve(ResolveArgs),
}

#[derive(Args)]
struct ResolveArgs {
  /// Entry file (.js or .ts).
  entry: PathBuf,

  /// Permit an external package (repeatable).
  #[arg(long = "allow", value_name = "NAME")]
  allow: Vec<String>,

  /// Do not permit Node.js built-in modules by default.
  #[arg(long)]
  no_builtins: bool,

  /// Fail if more than this many files are reachable (at least 1).
  #[arg(long)]
  max_files: Option<NonZeroUsize>,

  /// JSON config file with `allowedPackages`, `builtins` and `maxFiles`.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Emit JSON instead of plain text.
  #[arg(long)]
  json: bool,

  /// Emit tracing spans (JSON) on stderr.
  #[arg(long)]
  trace: bool,

  /// Log resolution progress on stderr.
  #[arg(long, short)]
  verbose: bool,
}

#[derive(Serialize)]
struct JsonSuccess<'a> {
  entrypoint: &'a Path,
  files: &'a FileSet,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum JsonError<'a> {
  UnsupportedEntrypoint {
    entrypoint: &'a Path,
    message: String,
  },
  UnreadableEntrypoint {
    entrypoint: &'a Path,
    message: String,
  },
  Dependencies(&'a DependencyReport),
}

#[derive(Serialize)]
struct JsonFailure<'a> {
  error: JsonError<'a>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match cli.command {
    Commands::Resolve(args) => run_resolve(args),
  }
}

fn run_resolve(args: ResolveArgs) -> ExitCode {
  init_tracing(args.trace, args.verbose);

  let config = match build_config(&args) {
    Ok(config) => config,
    Err(err) => {
      eprintln!("{err}");
      return ExitCode::FAILURE;
    }
  };

  let entry = match absolute_path(&args.entry) {
    Ok(path) => path,
    Err(err) => {
      eprintln!("failed to locate entry {}: {err}", args.entry.display());
      return ExitCode::FAILURE;
    }
  };

  let resolver = Resolver::new(config.into_options());
  let result = resolver.resolve(&entry);

  if args.json {
    let serialized = match &result {
      Ok(files) => serde_json::to_string_pretty(&JsonSuccess {
        entrypoint: files.entrypoint(),
        files,
      }),
      Err(err) => serde_json::to_string_pretty(&JsonFailure {
        error: json_error(err),
      }),
    };
    match serialized {
      Ok(serialized) => println!("{serialized}"),
      Err(err) => {
        eprintln!("failed to serialize JSON: {err}");
        return ExitCode::FAILURE;
      }
    }
  } else {
    match &result {
      Ok(files) => {
        for path in files.paths() {
          println!("{}", path.display());
        }
      }
      Err(err) => eprintln!("{err}"),
    }
  }

  if result.is_ok() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

fn build_config(args: &ResolveArgs) -> Result<Config, String> {
  let mut config = match &args.config {
    Some(path) => load_config(path)?,
    None => Config::default(),
  };
  config.allowed_packages.extend(args.allow.iter().cloned());
  if args.no_builtins {
    config.builtins = false;
  }
  if args.max_files.is_some() {
    config.max_files = args.max_files;
  }
  Ok(config)
}

fn json_error(err: &ResolveError) -> JsonError<'_> {
  match err {
    ResolveError::UnsupportedEntrypoint { path } => JsonError::UnsupportedEntrypoint {
      entrypoint: path,
      message: err.to_string(),
    },
    ResolveError::UnreadableEntrypoint { path, .. } => JsonError::UnreadableEntrypoint {
      entrypoint: path,
      message: err.to_string(),
    },
    ResolveError::Dependencies(report) => JsonError::Dependencies(report),
  }
}

fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    Ok(std::env::current_dir()?.join(path))
  }
}

fn init_tracing(trace: bool, verbose: bool) {
  if trace {
    let _ = tracing_subscriber::fmt()
      .with_span_events(FmtSpan::CLOSE)
      .with_max_level(Level::DEBUG)
      .json()
      .with_ansi(false)
      .with_writer(std::io::stderr)
      .try_init();
  } else if verbose {
    let _ = tracing_subscriber::fmt()
      .with_max_level(Level::DEBUG)
      .with_writer(std::io::stderr)
      .try_init();
  }
}
