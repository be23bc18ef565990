pub mod compiled_unit;
pub mod generation_id;
pub mod import_map;
pub mod mime_kind;
pub mod module_type;
pub mod preview_snapshot;
pub mod published_resource;
pub mod sandbox_message;
pub mod transpiler;
