use arcstr::ArcStr;

use crate::MimeKind;

/// Output of the module compiler for a single project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
  pub path: String,
  pub mime_kind: MimeKind,
  pub text: ArcStr,
}
