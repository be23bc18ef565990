use livepack_error::PreviewErrorKind;

use crate::{GenerationId, ResourceHandle};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
  #[default]
  Idle,
  Building,
  Ready,
  Failed,
}

/// What the host UI renders: status, the message to show, and the document to frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreviewSnapshot {
  pub status: PreviewStatus,
  pub generation: Option<GenerationId>,
  pub error_message: Option<String>,
  pub error_kind: Option<PreviewErrorKind>,
  /// Set while `Ready`, and kept when a runtime error flips a ready preview to `Failed`.
  pub preview_handle: Option<ResourceHandle>,
  pub warnings: Vec<String>,
}

impl PreviewSnapshot {
  pub fn is_loading(&self) -> bool {
    self.status == PreviewStatus::Building
  }
}
