use std::sync::Arc;

use livepack_common::{
  GenerationId, MimeKind, PreviewOptions, ProjectNode, PublishedResource, Transpiler,
  DEFAULT_RESOURCE_ORIGIN,
};
use livepack_ecmascript::OxcTranspiler;
use livepack_error::BuildResult;
use livepack_resource::{MemoryResourceHost, ResourceArena, SharedResourceHost};

use crate::{
  stages::{
    compile::compile_modules,
    entry_document::{find_entry_document, rewrite_entry_document},
    flatten::flatten_project,
    import_map::{build_import_map, ImportMapOutput},
    publish::publish_units,
  },
  types::{build_generation::BuildGeneration, SharedOptions},
  utils::normalize_options::{normalize_options, NormalizeOptionsReturn},
};

/// Runs the preview pipeline: flatten, compile, publish, resolve, rewrite.
pub struct PreviewEngine<T: Transpiler = OxcTranspiler> {
  pub(crate) options: SharedOptions,
  pub(crate) transpiler: T,
  pub(crate) host: SharedResourceHost,
}

impl PreviewEngine<OxcTranspiler> {
  /// oxc transpilation with an in-memory resource host.
  pub fn new(options: PreviewOptions) -> Self {
    let origin =
      options.resource_origin.clone().unwrap_or_else(|| DEFAULT_RESOURCE_ORIGIN.to_string());
    let host = Arc::new(MemoryResourceHost::new(origin));
    Self::with_parts(options, OxcTranspiler::new(), host)
  }
}

impl<T: Transpiler> PreviewEngine<T> {
  pub fn with_parts(options: PreviewOptions, transpiler: T, host: SharedResourceHost) -> Self {
    let NormalizeOptionsReturn { options, warnings } = normalize_options(options);
    for warning in warnings {
      tracing::warn!("{warning}");
    }

    Self { options: Arc::new(options), transpiler, host }
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  pub fn host(&self) -> &SharedResourceHost {
    &self.host
  }

  /// Builds one generation. Nothing stays allocated when this returns an error.
  pub async fn build(
    &self,
    project: &[ProjectNode],
    generation: GenerationId,
  ) -> BuildResult<BuildGeneration> {
    let files = flatten_project(project);
    let entry = find_entry_document(&files, &self.options.entry_filename)?;

    let units =
      compile_modules(&files, entry.path, &self.transpiler, self.options.transpile_timeout).await?;

    let mut arena = ResourceArena::new(Arc::clone(&self.host));
    let modules = publish_units(&mut arena, units);

    let ImportMapOutput { import_map, warnings } =
      build_import_map(&self.options.externals, &modules);

    let document = rewrite_entry_document(entry, &modules, &import_map, &self.options, generation)?;
    let entry_handle = arena.publish(document.into(), MimeKind::Other);

    tracing::debug!(
      %generation,
      entry = entry.path,
      resources = arena.len(),
      warnings = warnings.len(),
      "built preview generation"
    );

    Ok(BuildGeneration {
      id: generation,
      entry_path: entry.path.to_string(),
      entry: PublishedResource {
        path: entry.path.to_string(),
        mime_kind: MimeKind::Other,
        handle: entry_handle,
      },
      modules,
      import_map,
      warnings,
      arena,
    })
  }
}
