use std::path::Path;

use sugar_path::SugarPath;

/// Helpers for the slash-delimited, root-less paths used as project file keys.
pub trait SlashPathExt {
  /// Last segment, `components/Button.tsx` -> `Button.tsx`.
  fn file_name(&self) -> &str;

  /// File name without its final extension, `Button.test.tsx` -> `Button.test`.
  fn file_stem(&self) -> &str;

  /// Extension after the final dot of the file name, if any.
  fn extension(&self) -> Option<&str>;

  /// Everything before the last separator, empty for top-level files.
  fn parent_dir(&self) -> &str;

  fn has_dir_separator(&self) -> bool;
}

impl SlashPathExt for str {
  fn file_name(&self) -> &str {
    self.rsplit('/').next().unwrap_or(self)
  }

  fn file_stem(&self) -> &str {
    let file_name = self.file_name();
    match file_name.rfind('.') {
      // `.env` style names have no extension to strip
      Some(0) | None => file_name,
      Some(idx) => &file_name[..idx],
    }
  }

  fn extension(&self) -> Option<&str> {
    let file_name = self.file_name();
    match file_name.rfind('.') {
      Some(0) | None => None,
      Some(idx) => Some(&file_name[idx + 1..]),
    }
  }

  fn parent_dir(&self) -> &str {
    self.rfind('/').map_or("", |idx| &self[..idx])
  }

  fn has_dir_separator(&self) -> bool {
    self.contains('/')
  }
}

/// Joins `specifier` onto `base_dir` and collapses `.`/`..` segments.
///
/// Returns `None` when the result escapes the project root.
pub fn join_slash(base_dir: &str, specifier: &str) -> Option<String> {
  let joined = if base_dir.is_empty() {
    Path::new(specifier).to_path_buf()
  } else {
    Path::new(base_dir).join(specifier)
  };
  let normalized = joined.normalize();
  let normalized = normalized.to_slash_lossy();
  if normalized.starts_with("..") || normalized.starts_with('/') {
    return None;
  }
  Some(normalized.trim_start_matches("./").to_string())
}

#[test]
fn test_slash_path_ext() {
  assert_eq!("components/Button.tsx".file_name(), "Button.tsx");
  assert_eq!("components/Button.tsx".file_stem(), "Button");
  assert_eq!("components/Button.tsx".extension(), Some("tsx"));
  assert_eq!("components/Button.tsx".parent_dir(), "components");
  assert_eq!("a/b.test.ts".file_stem(), "b.test");
  assert_eq!("Makefile".file_stem(), "Makefile");
  assert_eq!("Makefile".extension(), None);
  assert_eq!(".env".file_stem(), ".env");
  assert_eq!("index.html".parent_dir(), "");
  assert!(!"index.html".has_dir_separator());
}

#[test]
fn test_join_slash() {
  assert_eq!(join_slash("public", "main.tsx").as_deref(), Some("public/main.tsx"));
  assert_eq!(join_slash("public", "../src/main.tsx").as_deref(), Some("src/main.tsx"));
  assert_eq!(join_slash("", "main.tsx").as_deref(), Some("main.tsx"));
  assert_eq!(join_slash("", "../main.tsx"), None);
}
