use arcstr::ArcStr;
use livepack_common::{MimeKind, ResourceHandle};

use crate::SharedResourceHost;

/// Owns every resource published for one generation.
///
/// Dropping the arena releases all of them at once, so superseding a generation is a single
/// drop rather than per-handle cleanup.
pub struct ResourceArena {
  host: SharedResourceHost,
  handles: Vec<ResourceHandle>,
}

impl ResourceArena {
  pub fn new(host: SharedResourceHost) -> Self {
    Self { host, handles: Vec::new() }
  }

  pub fn publish(&mut self, text: ArcStr, mime_kind: MimeKind) -> ResourceHandle {
    let handle = self.host.create(text, mime_kind.mime());
    self.handles.push(handle.clone());
    handle
  }

  pub fn handles(&self) -> &[ResourceHandle] {
    &self.handles
  }

  pub fn len(&self) -> usize {
    self.handles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handles.is_empty()
  }

  pub fn host(&self) -> &SharedResourceHost {
    &self.host
  }

  fn release_all(&mut self) {
    let count = self.handles.len();
    for handle in self.handles.drain(..) {
      if !self.host.release(&handle) {
        tracing::warn!(%handle, "resource was already released");
      }
    }
    if count > 0 {
      tracing::debug!(count, "released generation resources");
    }
  }
}

impl Drop for ResourceArena {
  fn drop(&mut self) {
    self.release_all();
  }
}

impl std::fmt::Debug for ResourceArena {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ResourceArena").field("handles", &self.handles).finish_non_exhaustive()
  }
}

#[test]
fn test_drop_releases_everything() {
  use std::sync::Arc;

  use crate::{MemoryResourceHost, ResourceHost};

  let host = Arc::new(MemoryResourceHost::default());
  let mut arena = ResourceArena::new(Arc::clone(&host) as _);
  let script = arena.publish("export {}".into(), MimeKind::Script);
  arena.publish("body {}".into(), MimeKind::Style);
  assert_eq!(arena.len(), 2);
  assert_eq!(host.live_count(), 2);
  assert_eq!(host.fetch(&script).unwrap().mime, mime::TEXT_JAVASCRIPT);

  drop(arena);
  assert_eq!(host.live_count(), 0);
}
