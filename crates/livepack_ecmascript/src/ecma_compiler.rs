use arcstr::ArcStr;
use oxc::transformer::{ESTarget, JsxOptions, JsxRuntime, TransformOptions};

use crate::ParsedModule;

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Generated projects `import React from 'react'` and rely on it being in scope, so JSX is
  /// lowered with the classic runtime rather than `react/jsx-runtime`.
  pub fn transform_options() -> TransformOptions {
    TransformOptions {
      jsx: JsxOptions { runtime: JsxRuntime::Classic, ..JsxOptions::default() },
      ..TransformOptions::from(ESTarget::ESNext)
    }
  }

  pub fn transpile(source: impl Into<ArcStr>, path: &str) -> anyhow::Result<String> {
    Self::transpile_with(source, path, &Self::transform_options())
  }

  pub fn transpile_with(
    source: impl Into<ArcStr>,
    path: &str,
    options: &TransformOptions,
  ) -> anyhow::Result<String> {
    let mut module = ParsedModule::parse(path, source)?;
    module.transform(options)?;
    Ok(module.print())
  }
}

#[test]
fn test_strip_types() {
  let code = EcmaCompiler::transpile("const a: number = 1;", "a.ts").unwrap();
  assert_eq!(code, "const a = 1;\n");
}

#[test]
fn test_lower_jsx_with_classic_runtime() {
  let code = EcmaCompiler::transpile(
    "import React from 'react';\nexport const App = () => <div className=\"x\">hi</div>;",
    "App.tsx",
  )
  .unwrap();
  assert!(code.contains("React.createElement(\"div\""), "{code}");
  assert!(!code.contains("<div"), "{code}");
}

#[test]
fn test_keep_relative_imports() {
  let code = EcmaCompiler::transpile(
    "import App from './App';\nimport { createRoot } from 'react-dom/client';\ncreateRoot(document.getElementById('root')!).render(<App />);",
    "index.tsx",
  )
  .unwrap();
  assert!(code.contains("from \"./App\""), "{code}");
  assert!(code.contains("from \"react-dom/client\""), "{code}");
}

#[test]
fn test_syntax_error() {
  assert!(EcmaCompiler::transpile("const = ;", "broken.ts").is_err());
}
