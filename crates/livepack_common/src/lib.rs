mod preview_options;
mod project;
mod types;

pub use crate::{
  preview_options::{
    external_specifier::{ExternalSpecifier, PINNED_EXTERNALS},
    normalized_preview_options::NormalizedPreviewOptions,
    sandbox_policy::{SandboxCapabilities, SandboxPolicy},
    PreviewOptions, DEFAULT_ENTRY_FILENAME, DEFAULT_RESOURCE_ORIGIN, DEFAULT_STYLESHEET_LOADER,
    DEFAULT_TRANSPILE_TIMEOUT,
  },
  project::{
    flat_file_map::FlatFileMap,
    project_node::{NodeKind, ProjectNode},
    read_project_tree::{read_project_tree, read_project_tree_str},
  },
  types::{
    compiled_unit::CompiledUnit,
    generation_id::GenerationId,
    import_map::{ImportMap, ImportMapInsert},
    mime_kind::MimeKind,
    module_type::ModuleType,
    preview_snapshot::{PreviewSnapshot, PreviewStatus},
    published_resource::{PublishedResource, ResourceHandle},
    sandbox_message::{SandboxMessage, PREVIEW_ERROR_TYPE},
    transpiler::{FnTranspiler, Transpiler},
  },
};
