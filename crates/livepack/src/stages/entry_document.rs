use std::sync::LazyLock;

use livepack_common::{
  FlatFileMap, GenerationId, ImportMap, NormalizedPreviewOptions, PublishedResource,
  ResourceHandle,
};
use livepack_error::{BuildResult, PreviewError};
use livepack_utils::{
  html::{escape_attribute, escape_json_for_script},
  path_ext::{join_slash, SlashPathExt},
};
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

const ERROR_SHIM: &str = include_str!("../runtime/error_shim.js");
const GENERATION_PLACEHOLDER: &str = "__LIVEPACK_GENERATION__";

static SCRIPT_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?is)<script\b[^>]*?\ssrc\s*=\s*["']([^"']+)["'][^>]*>\s*</script\s*>"#).unwrap()
});
static HEAD_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head\s*>").unwrap());
static HEAD_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct EntryDocument<'a> {
  pub path: &'a str,
  pub source: &'a str,
}

/// The first file, in project order, whose path ends with the entry filename.
pub fn find_entry_document<'a>(
  files: &'a FlatFileMap,
  entry_filename: &str,
) -> BuildResult<EntryDocument<'a>> {
  files
    .iter()
    .find(|(path, _)| path.ends_with(entry_filename))
    .map(|(path, source)| EntryDocument { path, source })
    .ok_or_else(|| {
      PreviewError::MissingEntryDocument { entry_filename: entry_filename.to_string() }.into()
    })
}

/// Points local `<script src>` references at their published resources and injects the
/// stylesheet loader, the import map and the error shim before `</head>`.
pub fn rewrite_entry_document(
  entry: EntryDocument<'_>,
  resources: &[PublishedResource],
  import_map: &ImportMap,
  options: &NormalizedPreviewOptions,
  generation: GenerationId,
) -> BuildResult<String> {
  let handles = resources
    .iter()
    .map(|resource| (resource.path.as_str(), &resource.handle))
    .collect::<FxHashMap<_, _>>();
  let entry_dir = entry.path.parent_dir();

  let mut rewritten = 0usize;
  let document = SCRIPT_SRC_RE.replace_all(entry.source, |caps: &Captures| {
    match resolve_script_src(&caps[1], entry_dir, &handles) {
      Some(handle) => {
        rewritten += 1;
        format!(r#"<script type="module" src="{}"></script>"#, escape_attribute(handle.as_str()))
      }
      // External or unknown, leave it to the browser.
      None => caps[0].to_string(),
    }
  });

  let mut injection = String::new();
  if let Some(loader) = &options.stylesheet_loader {
    if !document.contains(loader_marker(loader)) {
      injection.push_str(&format!("<script src=\"{}\"></script>\n", escape_attribute(loader)));
    }
  }
  let import_map_json = import_map.to_json().map_err(anyhow::Error::from)?;
  injection.push_str(&format!(
    "<script type=\"importmap\">{}</script>\n",
    escape_json_for_script(&import_map_json)
  ));
  injection.push_str(&format!(
    "<script>\n{}</script>\n",
    ERROR_SHIM.replace(GENERATION_PLACEHOLDER, &generation.raw().to_string())
  ));

  tracing::debug!(path = entry.path, rewritten, "rewrote entry document");
  Ok(inject_into_head(&document, &injection))
}

fn resolve_script_src<'r>(
  src: &str,
  entry_dir: &str,
  handles: &FxHashMap<&str, &'r ResourceHandle>,
) -> Option<&'r ResourceHandle> {
  let clean = src.strip_prefix("./").or_else(|| src.strip_prefix('/')).unwrap_or(src);

  handles.get(clean).or_else(|| handles.get(src)).copied().or_else(|| {
    join_slash(entry_dir, clean).and_then(|joined| handles.get(joined.as_str()).copied())
  })
}

/// What identifies the loader inside a document regardless of the scheme it was written with.
fn loader_marker(loader: &str) -> &str {
  loader.split_once("://").map_or(loader, |(_, rest)| rest)
}

fn inject_into_head(document: &str, injection: &str) -> String {
  let at = HEAD_CLOSE_RE
    .find(document)
    .map(|found| found.start())
    .or_else(|| HEAD_OPEN_RE.find(document).map(|found| found.end()))
    .unwrap_or(0);

  let mut output = String::with_capacity(document.len() + injection.len());
  output.push_str(&document[..at]);
  output.push_str(injection);
  output.push_str(&document[at..]);
  output
}

#[cfg(test)]
fn test_options() -> NormalizedPreviewOptions {
  crate::normalize_options(livepack_common::PreviewOptions::default()).options
}

#[cfg(test)]
fn published(path: &str, handle: &str) -> PublishedResource {
  use livepack_common::ModuleType;

  PublishedResource {
    path: path.to_string(),
    mime_kind: ModuleType::from_path(path).mime_kind(),
    handle: ResourceHandle::new(handle),
  }
}

#[test]
fn test_find_entry_document() {
  let files: FlatFileMap = [
    ("src/main.tsx".to_string(), String::new()),
    ("public/index.html".to_string(), "<html></html>".to_string()),
    ("index.html".to_string(), "second".to_string()),
  ]
  .into_iter()
  .collect();

  let entry = find_entry_document(&files, "index.html").unwrap();
  assert_eq!(entry.path, "public/index.html");

  let err = find_entry_document(&files, "app.html").unwrap_err();
  assert_eq!(err.kind(), livepack_error::PreviewErrorKind::MissingEntryDocument);
}

#[test]
fn test_rewrite_local_scripts_only() {
  let source = r#"<!DOCTYPE html>
<html>
<head>
  <title>App</title>
</head>
<body>
  <div id="root"></div>
  <script type="text/babel" src="./index.tsx"></script>
  <script src="/lib/util.js"></script>
  <script src="https://unpkg.com/some-lib"></script>
</body>
</html>"#;
  let resources =
    [published("index.tsx", "blob:livepack/1"), published("lib/util.js", "blob:livepack/2")];
  let document = rewrite_entry_document(
    EntryDocument { path: "index.html", source },
    &resources,
    &ImportMap::default(),
    &test_options(),
    GenerationId::new(7),
  )
  .unwrap();

  assert!(document.contains(r#"<script type="module" src="blob:livepack/1"></script>"#));
  assert!(document.contains(r#"<script type="module" src="blob:livepack/2"></script>"#));
  assert!(document.contains(r#"<script src="https://unpkg.com/some-lib"></script>"#));
  assert!(!document.contains("text/babel"));
}

#[test]
fn test_injection_order_and_placement() {
  let mut import_map = ImportMap::default();
  import_map.insert("./App", "blob:livepack/app");

  let source = "<html><head><title>t</title></head><body></body></html>";
  let document = rewrite_entry_document(
    EntryDocument { path: "index.html", source },
    &[],
    &import_map,
    &test_options(),
    GenerationId::new(3),
  )
  .unwrap();

  let loader = document.find(r#"<script src="https://cdn.tailwindcss.com"></script>"#).unwrap();
  let map = document
    .find(r#"<script type="importmap">{"imports":{"./App":"blob:livepack/app"}}</script>"#)
    .unwrap();
  let shim = document.find("preview-error").unwrap();
  let head_close = document.find("</head>").unwrap();
  assert!(loader < map && map < shim && shim < head_close);
  assert!(document.contains("var generation = 3;"));
  assert!(document.contains("onunhandledrejection"));
}

#[test]
fn test_skip_loader_when_already_referenced() {
  let source =
    r#"<html><head><script src="https://cdn.tailwindcss.com?plugins=forms"></script></head></html>"#;
  let document = rewrite_entry_document(
    EntryDocument { path: "index.html", source },
    &[],
    &ImportMap::default(),
    &test_options(),
    GenerationId::new(1),
  )
  .unwrap();
  assert_eq!(document.matches("cdn.tailwindcss.com").count(), 1);
}

#[test]
fn test_script_resolved_relative_to_entry_directory() {
  let source = r#"<html><head></head><body><script src="./main.tsx"></script></body></html>"#;
  let document = rewrite_entry_document(
    EntryDocument { path: "public/index.html", source },
    &[published("public/main.tsx", "blob:livepack/main")],
    &ImportMap::default(),
    &test_options(),
    GenerationId::new(1),
  )
  .unwrap();
  assert!(document.contains(r#"<script type="module" src="blob:livepack/main"></script>"#));
}

#[test]
fn test_document_without_head() {
  assert_eq!(inject_into_head("<body></body>", "X"), "X<body></body>");
  assert_eq!(inject_into_head("<HEAD lang=en><body>", "X"), "<HEAD lang=en>X<body>");
  assert_eq!(inject_into_head("<head></HEAD >", "X"), "<head>X</HEAD >");
}

#[test]
fn test_rewrite_ignores_data_src() {
  let source = r#"<head></head><script data-src="./x.js"></script><script defer src="./x.js"></script>"#;
  let document = rewrite_entry_document(
    EntryDocument { path: "index.html", source },
    &[published("x.js", "blob:livepack/x")],
    &ImportMap::default(),
    &test_options(),
    GenerationId::new(1),
  )
  .unwrap();

  assert!(document.contains(r#"<script data-src="./x.js"></script>"#));
  assert!(document.contains(r#"<script type="module" src="blob:livepack/x"></script>"#));
}
