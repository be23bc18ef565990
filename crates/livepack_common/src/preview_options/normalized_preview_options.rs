use std::time::Duration;

use crate::{ExternalSpecifier, SandboxPolicy};

#[derive(Debug, Clone)]
pub struct NormalizedPreviewOptions {
  // --- Input
  pub entry_filename: String,

  // --- Resolve
  pub externals: Vec<ExternalSpecifier>,

  // --- Document
  /// `None` when no stylesheet framework should be injected.
  pub stylesheet_loader: Option<String>,

  // --- Runtime
  pub sandbox: SandboxPolicy,
  pub transpile_timeout: Option<Duration>,
  pub resource_origin: String,
}
