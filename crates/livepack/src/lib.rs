mod controller;
mod engine;
mod sandbox;
mod stages;
mod types;
mod utils;

pub use crate::{
  controller::{PreviewController, RebuildOutcome},
  engine::PreviewEngine,
  sandbox::{MountedSandbox, SandboxEnvelope, SandboxHost, SandboxPort},
  stages::{
    compile::compile_modules,
    entry_document::{find_entry_document, rewrite_entry_document, EntryDocument},
    flatten::flatten_project,
    import_map::{build_import_map, AliasRule, ImportMapOutput, ALIAS_RULES},
    publish::publish_units,
  },
  types::build_generation::BuildGeneration,
  utils::normalize_options::{normalize_options, NormalizeOptionsReturn},
};
pub use livepack_common::*;
pub use livepack_ecmascript::OxcTranspiler;
pub use livepack_error::{BuildError, BuildResult, PreviewError, PreviewErrorKind};
pub use livepack_resource::{
  Blob, MemoryResourceHost, ResourceArena, ResourceHost, SharedResourceHost,
};
