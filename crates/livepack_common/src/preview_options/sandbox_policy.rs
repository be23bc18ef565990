use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct SandboxCapabilities: u16 {
    const ALLOW_SCRIPTS = 1 << 0;
    const ALLOW_SAME_ORIGIN = 1 << 1;
    const ALLOW_FORMS = 1 << 2;
    const ALLOW_MODALS = 1 << 3;
    const ALLOW_POPUPS = 1 << 4;
    const ALLOW_TOP_NAVIGATION = 1 << 5;
    const ALLOW_DOWNLOADS = 1 << 6;
    const ALLOW_POINTER_LOCK = 1 << 7;
  }
}

const SANDBOX_TOKENS: [(SandboxCapabilities, &str); 8] = [
  (SandboxCapabilities::ALLOW_SCRIPTS, "allow-scripts"),
  (SandboxCapabilities::ALLOW_SAME_ORIGIN, "allow-same-origin"),
  (SandboxCapabilities::ALLOW_FORMS, "allow-forms"),
  (SandboxCapabilities::ALLOW_MODALS, "allow-modals"),
  (SandboxCapabilities::ALLOW_POPUPS, "allow-popups"),
  (SandboxCapabilities::ALLOW_TOP_NAVIGATION, "allow-top-navigation"),
  (SandboxCapabilities::ALLOW_DOWNLOADS, "allow-downloads"),
  (SandboxCapabilities::ALLOW_POINTER_LOCK, "allow-pointer-lock"),
];

/// Capability set of the frame that runs generated code. Plugins are never grantable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
  pub capabilities: SandboxCapabilities,
}

impl Default for SandboxPolicy {
  /// The minimum a generated UI needs. Same-origin lets the frame dereference published
  /// resources, which live on the embedding page's origin.
  fn default() -> Self {
    Self {
      capabilities: SandboxCapabilities::ALLOW_SCRIPTS
        | SandboxCapabilities::ALLOW_SAME_ORIGIN
        | SandboxCapabilities::ALLOW_FORMS,
    }
  }
}

impl SandboxPolicy {
  pub fn allows(&self, capability: SandboxCapabilities) -> bool {
    self.capabilities.contains(capability)
  }

  /// Value of the iframe `sandbox` attribute.
  pub fn to_attribute(&self) -> String {
    SANDBOX_TOKENS
      .iter()
      .filter(|(capability, _)| self.capabilities.contains(*capability))
      .map(|(_, token)| *token)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

#[test]
fn test_default_sandbox_policy() {
  let policy = SandboxPolicy::default();
  assert_eq!(policy.to_attribute(), "allow-scripts allow-same-origin allow-forms");
  assert!(!policy.allows(SandboxCapabilities::ALLOW_TOP_NAVIGATION));
  assert!(!policy.allows(SandboxCapabilities::ALLOW_POPUPS));

  let empty = SandboxPolicy { capabilities: SandboxCapabilities::empty() };
  assert_eq!(empty.to_attribute(), "");
}
