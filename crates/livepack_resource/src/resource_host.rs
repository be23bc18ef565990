use arcstr::ArcStr;
use livepack_common::ResourceHandle;
use mime::Mime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
  pub mime: Mime,
  pub text: ArcStr,
}

/// Allocates ephemeral, dereferenceable resources (the `URL.createObjectURL` family).
///
/// Every `create` must be paired with exactly one `release`; a host never reclaims a handle on
/// its own. Callers go through [`crate::ResourceArena`] rather than releasing by hand.
pub trait ResourceHost: Send + Sync {
  /// Always returns a fresh handle, even for text identical to a live resource.
  fn create(&self, text: ArcStr, mime: Mime) -> ResourceHandle;

  /// Returns `false` when the handle was not live.
  fn release(&self, handle: &ResourceHandle) -> bool;

  fn fetch(&self, handle: &ResourceHandle) -> Option<Blob>;

  fn live_count(&self) -> usize;
}
