use itertools::Itertools;
use livepack_common::{
  ExternalSpecifier, NormalizedPreviewOptions, PreviewOptions, DEFAULT_ENTRY_FILENAME,
  DEFAULT_RESOURCE_ORIGIN, DEFAULT_STYLESHEET_LOADER, DEFAULT_TRANSPILE_TIMEOUT,
};

pub struct NormalizeOptionsReturn {
  pub options: NormalizedPreviewOptions,
  pub warnings: Vec<anyhow::Error>,
}

pub fn normalize_options(raw_options: PreviewOptions) -> NormalizeOptionsReturn {
  let mut warnings = vec![];

  let entry_filename = match raw_options.entry_filename {
    Some(name) if name.trim().is_empty() => {
      warnings.push(anyhow::anyhow!(
        "Empty entry filename, falling back to `{DEFAULT_ENTRY_FILENAME}`"
      ));
      DEFAULT_ENTRY_FILENAME.to_string()
    }
    Some(name) => name.trim().trim_start_matches('/').to_string(),
    None => DEFAULT_ENTRY_FILENAME.to_string(),
  };

  let stylesheet_loader = if raw_options.inject_stylesheet_loader.unwrap_or(true) {
    match raw_options.stylesheet_loader {
      Some(url) if url.trim().is_empty() => None,
      Some(url) => Some(url),
      None => Some(DEFAULT_STYLESHEET_LOADER.to_string()),
    }
  } else {
    None
  };

  let transpile_timeout = match raw_options.transpile_timeout {
    Some(timeout) if timeout.is_zero() => None,
    Some(timeout) => Some(timeout),
    None => Some(DEFAULT_TRANSPILE_TIMEOUT),
  };

  let externals = raw_options.externals.unwrap_or_else(ExternalSpecifier::pinned);
  for specifier in externals.iter().map(|external| external.specifier.as_str()).duplicates() {
    warnings.push(anyhow::anyhow!(
      "External `{specifier}` is listed more than once, the last entry is used"
    ));
  }
  // The last entry wins and keeps its position.
  let externals = externals
    .iter()
    .rev()
    .unique_by(|external| external.specifier.as_str())
    .cloned()
    .collect_vec()
    .into_iter()
    .rev()
    .collect_vec();

  let normalized = NormalizedPreviewOptions {
    entry_filename,
    externals,
    stylesheet_loader,
    sandbox: raw_options.sandbox.unwrap_or_default(),
    transpile_timeout,
    resource_origin: raw_options
      .resource_origin
      .unwrap_or_else(|| DEFAULT_RESOURCE_ORIGIN.to_string()),
  };

  NormalizeOptionsReturn { options: normalized, warnings }
}

#[test]
fn test_normalize_defaults() {
  let NormalizeOptionsReturn { options, warnings } = normalize_options(PreviewOptions::default());
  assert!(warnings.is_empty());
  assert_eq!(options.entry_filename, "index.html");
  assert_eq!(options.externals.len(), 3);
  assert_eq!(options.externals[0].specifier, "react");
  assert_eq!(options.stylesheet_loader.as_deref(), Some("https://cdn.tailwindcss.com"));
  assert_eq!(options.transpile_timeout, Some(DEFAULT_TRANSPILE_TIMEOUT));
  assert_eq!(options.sandbox.to_attribute(), "allow-scripts allow-same-origin allow-forms");
}

#[test]
fn test_normalize_overrides() {
  use std::time::Duration;

  let NormalizeOptionsReturn { options, warnings } = normalize_options(PreviewOptions {
    entry_filename: Some("  ".to_string()),
    inject_stylesheet_loader: Some(false),
    stylesheet_loader: Some("https://example.test/style.js".to_string()),
    transpile_timeout: Some(Duration::ZERO),
    externals: Some(vec![]),
    ..PreviewOptions::default()
  });
  assert_eq!(warnings.len(), 1);
  assert_eq!(options.entry_filename, "index.html");
  assert_eq!(options.stylesheet_loader, None);
  assert_eq!(options.transpile_timeout, None);
  assert!(options.externals.is_empty());
}

#[test]
fn test_normalize_duplicate_externals() {
  let NormalizeOptionsReturn { options, warnings } = normalize_options(PreviewOptions {
    externals: Some(vec![
      ExternalSpecifier::new("react", "https://esm.sh/react@18"),
      ExternalSpecifier::new("zod", "https://esm.sh/zod"),
      ExternalSpecifier::new("react", "https://esm.sh/react@19"),
    ]),
    ..PreviewOptions::default()
  });
  assert_eq!(warnings.len(), 1);
  let externals = options
    .externals
    .iter()
    .map(|external| (external.specifier.as_str(), external.url.as_str()))
    .collect::<Vec<_>>();
  assert_eq!(externals, [("zod", "https://esm.sh/zod"), ("react", "https://esm.sh/react@19")]);
}
