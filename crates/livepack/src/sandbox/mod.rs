use livepack_common::{GenerationId, ResourceHandle, SandboxMessage, SandboxPolicy};
use livepack_utils::html::escape_attribute;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A message received from a mounted sandbox, stamped with the generation it was mounted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxEnvelope {
  pub generation: GenerationId,
  pub message: SandboxMessage,
}

/// Mounts published entry documents into sandboxed frames and collects what they report.
pub struct SandboxHost {
  policy: SandboxPolicy,
  tx: UnboundedSender<SandboxEnvelope>,
}

impl SandboxHost {
  pub fn new(policy: SandboxPolicy) -> (Self, UnboundedReceiver<SandboxEnvelope>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { policy, tx }, rx)
  }

  pub fn policy(&self) -> SandboxPolicy {
    self.policy
  }

  /// One sandbox per generation. Replacing the mount is what stops the old one.
  pub fn mount(&self, generation: GenerationId, src: ResourceHandle) -> MountedSandbox {
    tracing::debug!(%generation, %src, "mounting sandbox");
    MountedSandbox {
      generation,
      src,
      policy: self.policy,
      port: SandboxPort { generation, tx: self.tx.clone() },
    }
  }
}

#[derive(Debug, Clone)]
pub struct MountedSandbox {
  generation: GenerationId,
  src: ResourceHandle,
  policy: SandboxPolicy,
  port: SandboxPort,
}

impl MountedSandbox {
  pub fn generation(&self) -> GenerationId {
    self.generation
  }

  pub fn src(&self) -> &ResourceHandle {
    &self.src
  }

  pub fn policy(&self) -> SandboxPolicy {
    self.policy
  }

  /// The inbound channel for this frame only. The embedding page forwards every message the
  /// frame posts into it.
  pub fn port(&self) -> SandboxPort {
    self.port.clone()
  }

  /// Markup for the frame the host page renders.
  pub fn frame_markup(&self) -> String {
    format!(
      r#"<iframe src="{}" title="App Preview" sandbox="{}"></iframe>"#,
      escape_attribute(self.src.as_str()),
      self.policy.to_attribute()
    )
  }
}

#[derive(Debug, Clone)]
pub struct SandboxPort {
  generation: GenerationId,
  tx: UnboundedSender<SandboxEnvelope>,
}

impl SandboxPort {
  pub fn generation(&self) -> GenerationId {
    self.generation
  }

  /// Forwards a raw `postMessage` payload. Returns whether it was accepted.
  ///
  /// Payloads that are not ours are dropped, and so are payloads stamped by the shim of a
  /// different generation than the one this port was mounted for.
  pub fn post(&self, payload: &Value) -> bool {
    let Some(message) = SandboxMessage::from_value(payload) else {
      return false;
    };
    if message.generation().is_some_and(|tagged| tagged != self.generation) {
      tracing::debug!(port = %self.generation, "dropping message tagged for another generation");
      return false;
    }
    self.tx.send(SandboxEnvelope { generation: self.generation, message }).is_ok()
  }
}

#[test]
fn test_mount_and_post() {
  use serde_json::json;

  let (host, mut rx) = SandboxHost::new(SandboxPolicy::default());
  let mounted = host.mount(GenerationId::new(2), ResourceHandle::new("blob:livepack/entry"));
  assert_eq!(
    mounted.frame_markup(),
    r#"<iframe src="blob:livepack/entry" title="App Preview" sandbox="allow-scripts allow-same-origin allow-forms"></iframe>"#
  );

  let port = mounted.port();
  assert!(port.post(&json!({ "type": "preview-error", "message": "boom", "generation": 2 })));
  assert!(port.post(&json!({ "type": "preview-error", "message": "untagged" })));
  assert!(!port.post(&json!({ "type": "preview-error", "message": "old", "generation": 1 })));
  assert!(!port.post(&json!({ "type": "ready" })));

  let first = rx.try_recv().unwrap();
  assert_eq!(first.generation, GenerationId::new(2));
  assert_eq!(
    first.message,
    SandboxMessage::PreviewError { message: "boom".to_string(), generation: Some(GenerationId::new(2)) }
  );
  assert_eq!(rx.try_recv().unwrap().generation, GenerationId::new(2));
  assert!(rx.try_recv().is_err());
}
