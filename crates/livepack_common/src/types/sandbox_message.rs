use serde_json::Value;

use crate::GenerationId;

pub const PREVIEW_ERROR_TYPE: &str = "preview-error";

/// A message posted from inside a sandbox to the embedding page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxMessage {
  PreviewError { message: String, generation: Option<GenerationId> },
}

impl SandboxMessage {
  /// Parses `{ type: "preview-error", message, generation? }`. Anything else is not ours.
  ///
  /// A non-string `message` is stringified rather than rejected, since generated code can
  /// throw arbitrary values.
  pub fn from_value(value: &Value) -> Option<Self> {
    let object = value.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some(PREVIEW_ERROR_TYPE) {
      return None;
    }

    let message = match object.get("message") {
      Some(Value::String(message)) => message.clone(),
      None | Some(Value::Null) => "Unknown error".to_string(),
      Some(other) => other.to_string(),
    };
    let generation = object.get("generation").and_then(Value::as_u64).map(GenerationId::new);

    Some(Self::PreviewError { message, generation })
  }

  pub fn generation(&self) -> Option<GenerationId> {
    match self {
      Self::PreviewError { generation, .. } => *generation,
    }
  }
}

#[test]
fn test_sandbox_message_from_value() {
  use serde_json::json;

  assert_eq!(
    SandboxMessage::from_value(&json!({ "type": "preview-error", "message": "boom", "generation": 3 })),
    Some(SandboxMessage::PreviewError {
      message: "boom".to_string(),
      generation: Some(GenerationId::new(3))
    })
  );
  assert_eq!(
    SandboxMessage::from_value(&json!({ "type": "preview-error", "message": { "code": 1 } })),
    Some(SandboxMessage::PreviewError { message: r#"{"code":1}"#.to_string(), generation: None })
  );
  assert_eq!(SandboxMessage::from_value(&json!({ "type": "resize", "height": 10 })), None);
  assert_eq!(SandboxMessage::from_value(&json!("preview-error")), None);
}
