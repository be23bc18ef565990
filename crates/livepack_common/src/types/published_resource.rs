use std::fmt;

use arcstr::ArcStr;

use crate::MimeKind;

/// Opaque, dereferenceable URI of an ephemeral resource, e.g. `blob:livepack/<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(ArcStr);

impl ResourceHandle {
  pub fn new(uri: impl Into<ArcStr>) -> Self {
    Self(uri.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ResourceHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ResourceHandle {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedResource {
  pub path: String,
  pub mime_kind: MimeKind,
  pub handle: ResourceHandle,
}
