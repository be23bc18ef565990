use std::future::Future;

/// Turns one script source into text a browser can load as an ES module.
///
/// `path` is the file identity, used to pick the syntax and in diagnostics. The returned
/// error message ends up in the user-visible `Failed to compile <path>: ...` report.
pub trait Transpiler: Send + Sync {
  fn transpile(&self, source: &str, path: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Adapts a synchronous closure into a [`Transpiler`].
pub struct FnTranspiler<F>(pub F);

impl<F> FnTranspiler<F>
where
  F: Fn(&str, &str) -> anyhow::Result<String> + Send + Sync,
{
  pub fn new(transpile: F) -> Self {
    Self(transpile)
  }
}

impl<F> Transpiler for FnTranspiler<F>
where
  F: Fn(&str, &str) -> anyhow::Result<String> + Send + Sync,
{
  async fn transpile(&self, source: &str, path: &str) -> anyhow::Result<String> {
    (self.0)(source, path)
  }
}
