use livepack_utils::indexmap::FxIndexMap;
use serde::Serialize;

/// The resolution table handed to the browser as `<script type="importmap">`.
///
/// Several specifiers may point at the same target. Re-inserting a specifier keeps its
/// original position and replaces the target, so the last writer wins.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportMap {
  imports: FxIndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMapInsert {
  New,
  /// Same specifier, same target.
  Unchanged,
  Replaced { previous: String },
}

impl ImportMap {
  pub fn insert(&mut self, specifier: impl Into<String>, target: impl Into<String>) -> ImportMapInsert {
    let target = target.into();
    match self.imports.insert(specifier.into(), target.clone()) {
      None => ImportMapInsert::New,
      Some(previous) if previous == target => ImportMapInsert::Unchanged,
      Some(previous) => ImportMapInsert::Replaced { previous },
    }
  }

  pub fn get(&self, specifier: &str) -> Option<&str> {
    self.imports.get(specifier).map(String::as_str)
  }

  pub fn contains(&self, specifier: &str) -> bool {
    self.imports.contains_key(specifier)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.imports.iter().map(|(specifier, target)| (specifier.as_str(), target.as_str()))
  }

  pub fn len(&self) -> usize {
    self.imports.len()
  }

  pub fn is_empty(&self) -> bool {
    self.imports.is_empty()
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

#[test]
fn test_import_map_last_write_wins() {
  let mut map = ImportMap::default();
  assert_eq!(map.insert("./x", "blob:a"), ImportMapInsert::New);
  assert_eq!(map.insert("react", "https://esm.sh/react"), ImportMapInsert::New);
  assert_eq!(map.insert("./x", "blob:a"), ImportMapInsert::Unchanged);
  assert_eq!(
    map.insert("./x", "blob:b"),
    ImportMapInsert::Replaced { previous: "blob:a".to_string() }
  );
  assert_eq!(map.get("./x"), Some("blob:b"));
  assert_eq!(map.len(), 2);
  assert_eq!(
    map.to_json().unwrap(),
    r#"{"imports":{"./x":"blob:b","react":"https://esm.sh/react"}}"#
  );
}
