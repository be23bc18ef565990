pub mod build_generation;

use std::sync::Arc;

use livepack_common::NormalizedPreviewOptions;

pub type SharedOptions = Arc<NormalizedPreviewOptions>;
