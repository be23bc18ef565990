use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
  /// A single file failed transpilation. Fatal to the whole build.
  #[error("Failed to compile {path}: {message}")]
  Compile { path: String, message: String },
  #[error("No {entry_filename} found in the project. Project must have an entry {entry_filename}.")]
  MissingEntryDocument { entry_filename: String },
  #[error("Timed out while compiling {path}")]
  TranspileTimeout { path: String },
  /// Reported from inside a running sandbox. The mounted preview stays visible.
  #[error("{message}")]
  Runtime { message: String },
  /// Published resources outlived their generation. Only a programming defect gets here.
  #[error("{live} published resources are still allocated after teardown")]
  ResourceLeak { live: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewErrorKind {
  Compile,
  MissingEntryDocument,
  TranspileTimeout,
  Runtime,
  ResourceLeak,
  Other,
}

impl PreviewError {
  pub fn kind(&self) -> PreviewErrorKind {
    match self {
      Self::Compile { .. } => PreviewErrorKind::Compile,
      Self::MissingEntryDocument { .. } => PreviewErrorKind::MissingEntryDocument,
      Self::TranspileTimeout { .. } => PreviewErrorKind::TranspileTimeout,
      Self::Runtime { .. } => PreviewErrorKind::Runtime,
      Self::ResourceLeak { .. } => PreviewErrorKind::ResourceLeak,
    }
  }

  /// Pipeline errors tear the preview down; runtime errors leave it mounted.
  pub fn is_pipeline_error(&self) -> bool {
    !matches!(self, Self::Runtime { .. })
  }
}

#[test]
fn test_compile_error_message() {
  let error = PreviewError::Compile { path: "App.tsx".into(), message: "Unexpected token".into() };
  assert_eq!(error.to_string(), "Failed to compile App.tsx: Unexpected token");
  assert!(error.is_pipeline_error());
  assert!(!PreviewError::Runtime { message: "x".into() }.is_pipeline_error());
}
