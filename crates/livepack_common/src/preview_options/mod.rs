pub mod external_specifier;
pub mod normalized_preview_options;
pub mod sandbox_policy;

use std::time::Duration;

use crate::{ExternalSpecifier, SandboxPolicy};

pub const DEFAULT_ENTRY_FILENAME: &str = "index.html";
pub const DEFAULT_STYLESHEET_LOADER: &str = "https://cdn.tailwindcss.com";
pub const DEFAULT_RESOURCE_ORIGIN: &str = "livepack";
pub const DEFAULT_TRANSPILE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default, Debug, Clone)]
pub struct PreviewOptions {
  // --- Input
  pub entry_filename: Option<String>,

  // --- Resolve
  /// Replaces the pinned package list entirely.
  pub externals: Option<Vec<ExternalSpecifier>>,

  // --- Document
  pub inject_stylesheet_loader: Option<bool>,
  pub stylesheet_loader: Option<String>,

  // --- Runtime
  pub sandbox: Option<SandboxPolicy>,
  /// `Duration::ZERO` disables the timeout.
  pub transpile_timeout: Option<Duration>,
  pub resource_origin: Option<String>,
}
