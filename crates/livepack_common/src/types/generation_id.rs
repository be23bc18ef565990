use std::fmt;

/// Identifies one build generation. Strictly increasing within a controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationId(u64);

impl GenerationId {
  pub fn new(raw: u64) -> Self {
    Self(raw)
  }

  #[must_use]
  pub fn next(self) -> Self {
    Self(self.0 + 1)
  }

  pub fn raw(self) -> u64 {
    self.0
  }
}

impl fmt::Display for GenerationId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}
