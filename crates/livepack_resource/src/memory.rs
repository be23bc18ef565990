use arcstr::ArcStr;
use dashmap::DashMap;
use livepack_common::{ResourceHandle, DEFAULT_RESOURCE_ORIGIN};
use mime::Mime;
use uuid::Uuid;

use crate::{Blob, ResourceHost};

/// In-process blob registry with `blob:<origin>/<uuid>` handles.
#[derive(Debug)]
pub struct MemoryResourceHost {
  origin: String,
  blobs: DashMap<ResourceHandle, Blob>,
}

impl MemoryResourceHost {
  pub fn new(origin: impl Into<String>) -> Self {
    Self { origin: origin.into(), blobs: DashMap::default() }
  }

  pub fn origin(&self) -> &str {
    &self.origin
  }
}

impl Default for MemoryResourceHost {
  fn default() -> Self {
    Self::new(DEFAULT_RESOURCE_ORIGIN)
  }
}

impl ResourceHost for MemoryResourceHost {
  fn create(&self, text: ArcStr, mime: Mime) -> ResourceHandle {
    let handle = ResourceHandle::new(format!("blob:{}/{}", self.origin, Uuid::new_v4()));
    self.blobs.insert(handle.clone(), Blob { mime, text });
    handle
  }

  fn release(&self, handle: &ResourceHandle) -> bool {
    self.blobs.remove(handle).is_some()
  }

  fn fetch(&self, handle: &ResourceHandle) -> Option<Blob> {
    self.blobs.get(handle).map(|blob| blob.value().clone())
  }

  fn live_count(&self) -> usize {
    self.blobs.len()
  }
}

#[test]
fn test_memory_resource_host() {
  let host = MemoryResourceHost::new("test");
  let a = host.create("x".into(), mime::TEXT_JAVASCRIPT);
  let b = host.create("x".into(), mime::TEXT_JAVASCRIPT);
  assert_ne!(a, b);
  assert!(a.as_str().starts_with("blob:test/"));
  assert_eq!(host.live_count(), 2);
  assert_eq!(host.fetch(&a).unwrap().text, "x");

  assert!(host.release(&a));
  assert!(!host.release(&a));
  assert!(host.fetch(&a).is_none());
  assert_eq!(host.live_count(), 1);
}
