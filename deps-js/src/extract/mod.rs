//! Extraction of module specifiers from source text.
//!
//! Each dialect has its own [`Extractor`]; both honour the same contract: parse the whole file,
//! then walk the syntax tree and register every statically known specifier. Malformed input is
//! reported as a [`ParseError`] value, never a panic.
//!
//! Both dialects are parsed with `oxc_parser`, which rejects anything a conforming engine would
//! reject. Specifiers that cannot be determined statically (`require(name)`, interpolated
//! templates) are dropped silently. String values come from the parser already cooked.

use crate::dialect::Dialect;
use crate::specifier::Reference;
use oxc_allocator::Allocator;
use oxc_ast::ast::Argument;
use oxc_ast::ast::Program;
use oxc_ast::ast::StringLiteral;
use oxc_ast::ast::TemplateLiteral;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::ParseOptions;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::collections::BTreeSet;

pub mod js;
pub mod ts;

pub use js::JsExtractor;
pub use ts::TsExtractor;

/// Specifiers referenced by one file, already classified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
  pub local: BTreeSet<String>,
  pub external: BTreeSet<String>,
}

impl Module {
  pub fn register(&mut self, specifier: String) {
    if specifier.is_empty() {
      return;
    }
    match Reference::classify(&specifier) {
      Reference::Local(s) => self.local.insert(s),
      Reference::External(s) => self.external.insert(s),
    };
  }

  pub fn is_empty(&self) -> bool {
    self.local.is_empty() && self.external.is_empty()
  }
}

/// A file whose content could not be parsed under its dialect's grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({line}:{column})")]
pub struct ParseError {
  pub message: String,
  /// 1-based.
  pub line: usize,
  /// 1-based, in bytes.
  pub column: usize,
}

impl ParseError {
  pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
    Self {
      message: message.into(),
      line,
      column,
    }
  }
}

/// Parses one dialect and collects its module specifiers.
pub trait Extractor {
  fn dialect(&self) -> Dialect;
  fn extract(&self, source: &str) -> Result<Module, ParseError>;
}

pub fn extractor_for(dialect: Dialect) -> &'static dyn Extractor {
  match dialect {
    Dialect::Js => &JsExtractor,
    Dialect::Ts => &TsExtractor,
  }
}

pub fn extract(source: &str, dialect: Dialect) -> Result<Module, ParseError> {
  extractor_for(dialect).extract(source)
}

/// Parse a whole file, failing with the first diagnostic.
///
/// Top-level `return` is accepted in every dialect, since scripts are not always conventional
/// modules.
pub(crate) fn parse_program<'a>(
  allocator: &'a Allocator,
  source: &'a str,
  source_type: SourceType,
) -> Result<Program<'a>, ParseError> {
  let options = ParseOptions {
    allow_return_outside_function: true,
    ..ParseOptions::default()
  };
  let ret = Parser::new(allocator, source, source_type)
    .with_options(options)
    .parse();
  if let Some(first) = ret.errors.first() {
    return Err(diagnostic_error(first, source));
  }
  if ret.panicked {
    return Err(ParseError::new("invalid syntax", 1, 1));
  }
  Ok(ret.program)
}

/// Cooked value of a plain string literal or a template literal without substitutions.
pub(crate) fn static_argument(argument: &Argument) -> Option<String> {
  match argument {
    Argument::StringLiteral(literal) => Some(literal_value(literal)),
    Argument::TemplateLiteral(template) => static_template(template),
    _ => None,
  }
}

pub(crate) fn literal_value(literal: &StringLiteral) -> String {
  literal.value.to_string()
}

fn static_template(template: &TemplateLiteral) -> Option<String> {
  if !template.expressions.is_empty() || template.quasis.len() != 1 {
    return None;
  }
  // Invalid escapes are allowed in tagged templates only, and leave no cooked value.
  let cooked = template.quasis.first()?.value.cooked.as_ref()?;
  Some(cooked.to_string())
}

fn diagnostic_error(diagnostic: &OxcDiagnostic, source: &str) -> ParseError {
  let offset = diagnostic
    .labels
    .as_ref()
    .and_then(|labels| labels.first())
    .map_or(0, |label| label.offset());
  let (line, column) = line_column(source, offset);
  ParseError::new(diagnostic.to_string(), line, column)
}

/// 1-based line and byte column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
  let before = &source.as_bytes()[..offset.min(source.len())];
  let line = before.iter().filter(|b| **b == b'\n').count() + 1;
  let line_start = before
    .iter()
    .rposition(|b| *b == b'\n')
    .map_or(0, |idx| idx + 1);
  (line, before.len() - line_start + 1)
}
