mod memory;
mod resource_arena;
mod resource_host;

use std::sync::Arc;

pub use crate::{
  memory::MemoryResourceHost,
  resource_arena::ResourceArena,
  resource_host::{Blob, ResourceHost},
};

pub type SharedResourceHost = Arc<dyn ResourceHost>;
