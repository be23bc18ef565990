/// Bare package specifiers generated code is allowed to import, pinned to fixed sources.
///
/// These versions are a compatibility contract with the code the generator writes. Bump them
/// deliberately.
pub const PINNED_EXTERNALS: &[(&str, &str)] = &[
  ("react", "https://esm.sh/react@^19.2.3"),
  ("react-dom/client", "https://esm.sh/react-dom@^19.2.3/client"),
  ("lucide-react", "https://esm.sh/lucide-react@^0.561.0"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSpecifier {
  pub specifier: String,
  pub url: String,
}

impl ExternalSpecifier {
  pub fn new(specifier: impl Into<String>, url: impl Into<String>) -> Self {
    Self { specifier: specifier.into(), url: url.into() }
  }

  pub fn pinned() -> Vec<Self> {
    PINNED_EXTERNALS.iter().map(|(specifier, url)| Self::new(*specifier, *url)).collect()
  }
}
