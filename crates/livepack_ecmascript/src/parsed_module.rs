use std::{fmt::Debug, path::Path};

use arcstr::ArcStr;
use livepack_common::ModuleType;
use oxc::{
  allocator::Allocator,
  ast::ast::Program,
  codegen::Codegen,
  diagnostics::OxcDiagnostic,
  parser::Parser,
  semantic::SemanticBuilder,
  span::SourceType,
  transformer::{TransformOptions, Transformer},
};
use self_cell::self_cell;

pub struct ModuleOwner {
  path: String,
  source: ArcStr,
  allocator: Allocator,
}

pub struct ModuleProgram<'cell> {
  program: Program<'cell>,
}

self_cell!(
  /// Keeps the arena, the source text and the `Program<'ast>` allocated from them together,
  /// so the module can move between compile steps without threading `'ast` around.
  struct ModuleCell {
    owner: ModuleOwner,

    #[covariant]
    dependent: ModuleProgram,
  }
);

/// One project file parsed by oxc.
pub struct ParsedModule {
  cell: ModuleCell,
  source_type: SourceType,
}

impl ParsedModule {
  pub fn parse(path: &str, source: impl Into<ArcStr>) -> anyhow::Result<Self> {
    let source_type = source_type_for(&ModuleType::from_path(path));
    let owner =
      ModuleOwner { path: path.to_string(), source: source.into(), allocator: Allocator::default() };

    let cell = ModuleCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.panicked || !ret.errors.is_empty() {
        Err(anyhow::anyhow!("{}", render_diagnostics(&ret.errors)))
      } else {
        Ok(ModuleProgram { program: ret.program })
      }
    })?;

    Ok(Self { cell, source_type })
  }

  pub fn path(&self) -> &str {
    &self.cell.borrow_owner().path
  }

  pub fn source(&self) -> &ArcStr {
    &self.cell.borrow_owner().source
  }

  pub fn source_type(&self) -> SourceType {
    self.source_type
  }

  pub fn program(&self) -> &Program {
    &self.cell.borrow_dependent().program
  }

  /// Strips TypeScript and lowers JSX in place.
  pub fn transform(&mut self, options: &TransformOptions) -> anyhow::Result<()> {
    let scoping = self.cell.with_dependent_mut(|_, dependent| {
      let ret = SemanticBuilder::new().build(&dependent.program);
      if ret.errors.is_empty() {
        Ok(ret.semantic.into_scoping())
      } else {
        Err(anyhow::anyhow!("{}", render_diagnostics(&ret.errors)))
      }
    })?;

    let errors = self.cell.with_dependent_mut(|owner, dependent| {
      Transformer::new(&owner.allocator, Path::new(&owner.path), options)
        .build_with_scoping(scoping, &mut dependent.program)
        .errors
    });

    if errors.is_empty() {
      Ok(())
    } else {
      Err(anyhow::anyhow!("{}", render_diagnostics(&errors)))
    }
  }

  pub fn print(&self) -> String {
    Codegen::new().build(self.program()).code
  }
}

impl Debug for ParsedModule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ParsedModule")
      .field("path", &self.path())
      .field("source_type", &self.source_type)
      .finish_non_exhaustive()
  }
}

fn source_type_for(module_type: &ModuleType) -> SourceType {
  match module_type {
    ModuleType::Tsx => SourceType::tsx(),
    ModuleType::Ts => SourceType::ts(),
    ModuleType::Jsx => SourceType::jsx(),
    ModuleType::Js | ModuleType::Css | ModuleType::Html | ModuleType::Custom(_) => {
      SourceType::mjs()
    }
  }
}

fn render_diagnostics(errors: &[OxcDiagnostic]) -> String {
  errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_parse_and_print() {
  let module = ParsedModule::parse("src/a.ts", "const a: number = 1;").unwrap();
  assert!(module.source_type().is_typescript());
  assert_eq!(module.path(), "src/a.ts");
  assert_eq!(module.source().as_str(), "const a: number = 1;");
}

#[test]
fn test_parse_error_is_reported() {
  let err = ParsedModule::parse("App.tsx", "export const App = () => <div>;").unwrap_err();
  assert!(!err.to_string().is_empty());
}
