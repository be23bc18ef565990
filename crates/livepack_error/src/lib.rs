mod preview_error;

use std::ops::{Deref, DerefMut};

pub use crate::preview_error::{PreviewError, PreviewErrorKind};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Kind of the first error, `Other` when it did not originate from the pipeline taxonomy.
  pub fn kind(&self) -> PreviewErrorKind {
    self
      .0
      .first()
      .and_then(|error| error.downcast_ref::<PreviewError>())
      .map_or(PreviewErrorKind::Other, PreviewError::kind)
  }

  /// All messages joined by newlines, the way they are shown to the user.
  pub fn message(&self) -> String {
    self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<PreviewError> for BuildError {
  fn from(error: PreviewError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_kind() {
  let error = BuildError::from(PreviewError::MissingEntryDocument {
    entry_filename: "index.html".to_string(),
  });
  assert_eq!(error.kind(), PreviewErrorKind::MissingEntryDocument);

  let error = BuildError::from(anyhow::anyhow!("boom"));
  assert_eq!(error.kind(), PreviewErrorKind::Other);
  assert_eq!(error.message(), "boom");
}
