use livepack_common::Transpiler;
use oxc::transformer::TransformOptions;

use crate::EcmaCompiler;

/// [`Transpiler`] backed by oxc. Runs synchronously on the calling task.
#[derive(Debug, Clone)]
pub struct OxcTranspiler {
  options: TransformOptions,
}

impl OxcTranspiler {
  pub fn new() -> Self {
    Self { options: EcmaCompiler::transform_options() }
  }

  pub fn with_options(options: TransformOptions) -> Self {
    Self { options }
  }
}

impl Default for OxcTranspiler {
  fn default() -> Self {
    Self::new()
  }
}

impl Transpiler for OxcTranspiler {
  async fn transpile(&self, source: &str, path: &str) -> anyhow::Result<String> {
    tracing::trace!(path, "transpiling");
    EcmaCompiler::transpile_with(source, path, &self.options)
  }
}

#[cfg(test)]
#[tokio::test]
async fn test_oxc_transpiler() {
  let transpiler = OxcTranspiler::new();
  let code = transpiler.transpile("export const n: number = 2;", "n.ts").await.unwrap();
  assert_eq!(code, "export const n = 2;\n");
  assert!(transpiler.transpile("export const = 2;", "n.ts").await.is_err());
}
