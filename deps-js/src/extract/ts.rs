use super::literal_value;
use super::parse_program;
use super::Extractor;
use super::Module;
use super::ParseError;
use crate::dialect::Dialect;
use oxc_allocator::Allocator;
use oxc_ast::ast::ExportAllDeclaration;
use oxc_ast::ast::ExportNamedDeclaration;
use oxc_ast::ast::ImportDeclaration;
use oxc_ast::Visit;
use oxc_span::SourceType;

/// TypeScript extractor. Only import and re-export declarations are recognised; `require` calls
/// are ordinary calls in this dialect.
#[derive(Clone, Copy, Debug, Default)]
pub struct TsExtractor;

impl Extractor for TsExtractor {
  fn dialect(&self) -> Dialect {
    Dialect::Ts
  }

  fn extract(&self, source: &str) -> Result<Module, ParseError> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, source, SourceType::ts())?;
    let mut visitor = TsVisitor::default();
    visitor.visit_program(&program);
    Ok(visitor.module)
  }
}

#[derive(Default)]
struct TsVisitor {
  module: Module,
}

impl<'a> Visit<'a> for TsVisitor {
  fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
    self.module.register(literal_value(&it.source));
  }

  fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
    if let Some(source) = &it.source {
      self.module.register(literal_value(source));
    }
  }

  fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
    self.module.register(literal_value(&it.source));
  }
}
