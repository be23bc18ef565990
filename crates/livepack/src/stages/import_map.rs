use livepack_common::{ExternalSpecifier, ImportMap, ImportMapInsert, PublishedResource};
use livepack_utils::path_ext::SlashPathExt;
use rustc_hash::FxHashMap;

/// The specifier forms every project file is reachable under.
///
/// Generated code imports the same file as `./components/Button`, `./Button` or
/// `components/Button.tsx` interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasRule {
  /// `components/Button.tsx`. For nested files this is the bare deep import form.
  ExactPath,
  /// `./components/Button.tsx`
  DotPath,
  /// `./Button.tsx`
  DotFileName,
  /// `./Button`
  DotFileStem,
}

/// Applied in this order for every file. Later rules and later files win on collision.
pub const ALIAS_RULES: [AliasRule; 4] =
  [AliasRule::ExactPath, AliasRule::DotPath, AliasRule::DotFileName, AliasRule::DotFileStem];

impl AliasRule {
  pub fn specifier(self, path: &str) -> String {
    match self {
      Self::ExactPath => path.to_string(),
      Self::DotPath => format!("./{path}"),
      Self::DotFileName => format!("./{}", path.file_name()),
      Self::DotFileStem => format!("./{}", path.file_stem()),
    }
  }
}

pub struct ImportMapOutput {
  pub import_map: ImportMap,
  /// One warning per specifier that changed owner.
  pub warnings: Vec<anyhow::Error>,
}

/// Builds the resolution table: pinned externals first, then every published project file.
///
/// The entry document is expected to be absent from `resources`.
pub fn build_import_map(
  externals: &[ExternalSpecifier],
  resources: &[PublishedResource],
) -> ImportMapOutput {
  let mut import_map = ImportMap::default();
  let mut owners = FxHashMap::<String, &str>::default();
  let mut warnings = vec![];

  for external in externals {
    import_map.insert(external.specifier.as_str(), external.url.as_str());
    owners.insert(external.specifier.clone(), external.url.as_str());
  }

  for resource in resources {
    for rule in ALIAS_RULES {
      let specifier = rule.specifier(&resource.path);
      let inserted = import_map.insert(specifier.as_str(), resource.handle.as_str());
      let previous_owner = owners.insert(specifier.clone(), resource.path.as_str());

      if let (ImportMapInsert::Replaced { .. }, Some(previous_owner)) = (inserted, previous_owner) {
        if previous_owner != resource.path {
          tracing::warn!(
            specifier = specifier.as_str(),
            winner = resource.path.as_str(),
            shadowed = previous_owner,
            "ambiguous import specifier"
          );
          warnings.push(anyhow::anyhow!(
            "Import specifier `{specifier}` is ambiguous: resolving to `{}`, shadowing `{}`",
            resource.path,
            previous_owner
          ));
        }
      }
    }
  }

  tracing::debug!(specifiers = import_map.len(), "built import map");
  ImportMapOutput { import_map, warnings }
}

#[cfg(test)]
fn resource(path: &str, handle: &str) -> PublishedResource {
  use livepack_common::{ModuleType, ResourceHandle};

  PublishedResource {
    path: path.to_string(),
    mime_kind: ModuleType::from_path(path).mime_kind(),
    handle: ResourceHandle::new(handle),
  }
}

#[test]
fn test_alias_rules() {
  let ImportMapOutput { import_map, warnings } =
    build_import_map(&[], &[resource("components/Button.tsx", "blob:button")]);
  assert!(warnings.is_empty());

  let specifiers = ["components/Button.tsx", "./components/Button.tsx", "./Button.tsx", "./Button"];
  for specifier in specifiers {
    assert_eq!(import_map.get(specifier), Some("blob:button"), "{specifier}");
  }
  assert_eq!(import_map.len(), 4);
}

#[test]
fn test_top_level_file_aliases_collapse() {
  let ImportMapOutput { import_map, warnings } =
    build_import_map(&ExternalSpecifier::pinned(), &[resource("App.tsx", "blob:app")]);
  assert!(warnings.is_empty());
  assert_eq!(import_map.get("react"), Some("https://esm.sh/react@^19.2.3"));
  assert_eq!(import_map.get("App.tsx"), Some("blob:app"));
  assert_eq!(import_map.get("./App.tsx"), Some("blob:app"));
  assert_eq!(import_map.get("./App"), Some("blob:app"));
  assert_eq!(import_map.len(), 6);
}

#[test]
fn test_collisions_last_write_wins_with_warning() {
  let ImportMapOutput { import_map, warnings } =
    build_import_map(&[], &[resource("a/x.js", "blob:a"), resource("b/x.js", "blob:b")]);

  assert_eq!(import_map.get("./x"), Some("blob:b"));
  assert_eq!(import_map.get("./x.js"), Some("blob:b"));
  assert_eq!(import_map.get("./a/x.js"), Some("blob:a"));
  assert_eq!(warnings.len(), 2);
  assert!(warnings[0].to_string().contains("`./x.js`"));
}
