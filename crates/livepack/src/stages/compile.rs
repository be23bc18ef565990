use std::time::Duration;

use arcstr::ArcStr;
use futures::future::try_join_all;
use livepack_common::{CompiledUnit, FlatFileMap, ModuleType, Transpiler};
use livepack_error::{BuildResult, PreviewError};

/// Compiles every file except the entry document, keeping the order of `files`.
///
/// The first file that fails to transpile fails the whole build. Half a module graph is worse
/// than no preview.
pub async fn compile_modules<T: Transpiler>(
  files: &FlatFileMap,
  entry_path: &str,
  transpiler: &T,
  transpile_timeout: Option<Duration>,
) -> BuildResult<Vec<CompiledUnit>> {
  let tasks = files
    .iter()
    .filter(|(path, _)| path.as_str() != entry_path)
    .map(|(path, text)| compile_module(path, text, transpiler, transpile_timeout));

  let units = try_join_all(tasks).await?;
  tracing::debug!(units = units.len(), "compiled project modules");
  Ok(units)
}

async fn compile_module<T: Transpiler>(
  path: &str,
  text: &str,
  transpiler: &T,
  transpile_timeout: Option<Duration>,
) -> BuildResult<CompiledUnit> {
  let module_type = ModuleType::from_path(path);
  let mime_kind = module_type.mime_kind();

  if !module_type.needs_transpile() {
    return Ok(CompiledUnit { path: path.to_string(), mime_kind, text: ArcStr::from(text) });
  }

  let transpiled = match transpile_timeout {
    Some(limit) => tokio::time::timeout(limit, transpiler.transpile(text, path))
      .await
      .map_err(|_| PreviewError::TranspileTimeout { path: path.to_string() })?,
    None => transpiler.transpile(text, path).await,
  };

  match transpiled {
    Ok(code) => Ok(CompiledUnit { path: path.to_string(), mime_kind, text: code.into() }),
    Err(err) => {
      tracing::debug!(path, error = %err, "transpilation failed");
      Err(PreviewError::Compile { path: path.to_string(), message: err.to_string() }.into())
    }
  }
}

#[cfg(test)]
fn files(entries: &[(&str, &str)]) -> FlatFileMap {
  entries.iter().map(|(path, text)| ((*path).to_string(), (*text).to_string())).collect()
}

#[cfg(test)]
#[tokio::test]
async fn test_compile_classifies_by_extension() {
  use livepack_common::{FnTranspiler, MimeKind};

  let transpiler =
    FnTranspiler::new(|source: &str, path: &str| Ok(format!("/* {path} */{source}")));
  let files = files(&[
    ("index.html", "<html></html>"),
    ("index.tsx", "tsx"),
    ("styles.css", "body {}"),
    ("lib/util.js", "js"),
    ("data.json", "{}"),
  ]);

  let units = compile_modules(&files, "index.html", &transpiler, None).await.unwrap();
  let summary = units
    .iter()
    .map(|unit| (unit.path.as_str(), unit.mime_kind, unit.text.as_str()))
    .collect::<Vec<_>>();
  assert_eq!(
    summary,
    vec![
      ("index.tsx", MimeKind::Script, "/* index.tsx */tsx"),
      ("styles.css", MimeKind::Style, "body {}"),
      ("lib/util.js", MimeKind::Script, "js"),
      ("data.json", MimeKind::Script, "{}"),
    ]
  );
}

#[cfg(test)]
#[tokio::test]
async fn test_compile_error_aborts_build() {
  use livepack_common::FnTranspiler;
  use livepack_error::PreviewErrorKind;

  let transpiler = FnTranspiler::new(|_: &str, path: &str| {
    if path == "broken.tsx" { Err(anyhow::anyhow!("Unexpected token")) } else { Ok(String::new()) }
  });
  let files = files(&[("ok.tsx", ""), ("broken.tsx", "<"), ("later.tsx", "")]);

  let err = compile_modules(&files, "index.html", &transpiler, None).await.unwrap_err();
  assert_eq!(err.kind(), PreviewErrorKind::Compile);
  assert_eq!(err.message(), "Failed to compile broken.tsx: Unexpected token");
}

#[cfg(test)]
#[tokio::test(start_paused = true)]
async fn test_transpile_timeout() {
  use livepack_error::PreviewErrorKind;

  struct Stalled;

  impl Transpiler for Stalled {
    async fn transpile(&self, _source: &str, _path: &str) -> anyhow::Result<String> {
      futures::future::pending().await
    }
  }

  let files = files(&[("App.tsx", "")]);
  let err = compile_modules(&files, "index.html", &Stalled, Some(Duration::from_secs(1)))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), PreviewErrorKind::TranspileTimeout);
}
