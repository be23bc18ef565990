use livepack_common::{CompiledUnit, PublishedResource};
use livepack_resource::ResourceArena;

/// Publishes one fresh resource per compiled unit into the generation's arena.
pub fn publish_units(
  arena: &mut ResourceArena,
  units: Vec<CompiledUnit>,
) -> Vec<PublishedResource> {
  units
    .into_iter()
    .map(|unit| {
      let handle = arena.publish(unit.text, unit.mime_kind);
      PublishedResource { path: unit.path, mime_kind: unit.mime_kind, handle }
    })
    .collect()
}

#[test]
fn test_publish_units_never_reuses_handles() {
  use std::sync::Arc;

  use livepack_common::MimeKind;
  use livepack_resource::{MemoryResourceHost, ResourceHost};

  let host = Arc::new(MemoryResourceHost::default());
  let unit =
    CompiledUnit { path: "a.js".to_string(), mime_kind: MimeKind::Script, text: "x".into() };

  let mut first = ResourceArena::new(Arc::clone(&host) as _);
  let mut second = ResourceArena::new(Arc::clone(&host) as _);
  let a = publish_units(&mut first, vec![unit.clone()]);
  let b = publish_units(&mut second, vec![unit]);

  assert_eq!(a[0].path, "a.js");
  assert_ne!(a[0].handle, b[0].handle);
  assert_eq!(host.live_count(), 2);

  drop(first);
  assert_eq!(host.live_count(), 1);
  assert_eq!(host.fetch(&b[0].handle).unwrap().text, "x");
}
