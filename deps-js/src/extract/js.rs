use super::literal_value;
use super::parse_program;
use super::static_argument;
use super::Extractor;
use super::Module;
use super::ParseError;
use crate::dialect::Dialect;
use oxc_allocator::Allocator;
use oxc_ast::ast::CallExpression;
use oxc_ast::ast::ExportAllDeclaration;
use oxc_ast::ast::ExportNamedDeclaration;
use oxc_ast::ast::Expression;
use oxc_ast::ast::ImportDeclaration;
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use oxc_span::SourceType;

/// JavaScript extractor.
///
/// Files are parsed as modules with top-level `return` allowed, so `import` declarations and
/// CommonJS code can share a file. Besides import and re-export declarations, `require(...)` and
/// `module.require(...)` calls are recognised.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsExtractor;

impl Extractor for JsExtractor {
  fn dialect(&self) -> Dialect {
    Dialect::Js
  }

  fn extract(&self, source: &str) -> Result<Module, ParseError> {
    let allocator = Allocator::default();
    let program = parse_program(&allocator, source, SourceType::mjs())?;
    let mut visitor = JsVisitor::default();
    visitor.visit_program(&program);
    Ok(visitor.module)
  }
}

#[derive(Default)]
struct JsVisitor {
  module: Module,
}

impl<'a> Visit<'a> for JsVisitor {
  fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
    if is_require_callee(&it.callee) {
      if let Some(specifier) = it.arguments.first().and_then(static_argument) {
        self.module.register(specifier);
      }
    }
    walk::walk_call_expression(self, it);
  }

  fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
    self.module.register(literal_value(&it.source));
  }

  fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
    match &it.source {
      Some(source) => self.module.register(literal_value(source)),
      None => walk::walk_export_named_declaration(self, it),
    }
  }

  fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
    self.module.register(literal_value(&it.source));
  }
}

fn is_require_callee(callee: &Expression) -> bool {
  match callee {
    Expression::Identifier(ident) => ident.name.as_str() == "require",
    Expression::StaticMemberExpression(member) => {
      let on_module = match &member.object {
        Expression::Identifier(object) => object.name.as_str() == "module",
        _ => false,
      };
      on_module && member.property.name.as_str() == "require"
    }
    _ => false,
  }
}
