use livepack_common::{GenerationId, ImportMap, PublishedResource, ResourceHandle};
use livepack_resource::{Blob, ResourceArena};

/// Everything one pipeline run published. Immutable; replaced wholesale, never patched.
///
/// Dropping it releases every resource it owns, the entry document included.
#[derive(Debug)]
pub struct BuildGeneration {
  pub(crate) id: GenerationId,
  pub(crate) entry_path: String,
  pub(crate) entry: PublishedResource,
  pub(crate) modules: Vec<PublishedResource>,
  pub(crate) import_map: ImportMap,
  pub(crate) warnings: Vec<anyhow::Error>,
  pub(crate) arena: ResourceArena,
}

impl BuildGeneration {
  pub fn id(&self) -> GenerationId {
    self.id
  }

  pub fn entry_path(&self) -> &str {
    &self.entry_path
  }

  /// The rewritten entry document.
  pub fn entry(&self) -> &PublishedResource {
    &self.entry
  }

  pub fn entry_handle(&self) -> &ResourceHandle {
    &self.entry.handle
  }

  /// Published project files, entry document excluded, in project order.
  pub fn modules(&self) -> &[PublishedResource] {
    &self.modules
  }

  pub fn import_map(&self) -> &ImportMap {
    &self.import_map
  }

  pub fn warnings(&self) -> &[anyhow::Error] {
    &self.warnings
  }

  /// Number of live resources owned by this generation.
  pub fn resource_count(&self) -> usize {
    self.arena.len()
  }

  /// Dereferences one of this generation's handles.
  pub fn fetch(&self, handle: &ResourceHandle) -> Option<Blob> {
    self.arena.host().fetch(handle)
  }

  pub fn entry_document(&self) -> Option<Blob> {
    self.fetch(&self.entry.handle)
  }
}
