use livepack_utils::indexmap::FxIndexMap;

/// Normalized slash path (no leading slash) -> raw source text.
///
/// Iteration order is the depth-first order of the project tree. A later duplicate path
/// replaces the earlier text but keeps the earlier position.
pub type FlatFileMap = FxIndexMap<String, String>;
