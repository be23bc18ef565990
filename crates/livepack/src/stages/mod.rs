pub mod compile;
pub mod entry_document;
pub mod flatten;
pub mod import_map;
pub mod publish;
