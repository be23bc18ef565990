use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
  File,
  #[serde(alias = "folder")]
  Directory,
}

/// One entry of a generated project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNode {
  pub name: String,
  #[serde(rename = "type", alias = "kind")]
  pub kind: NodeKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub children: Option<Vec<ProjectNode>>,
}

impl ProjectNode {
  pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
    Self { name: name.into(), kind: NodeKind::File, content: Some(content.into()), children: None }
  }

  /// A file whose content is missing, the shape a malformed generation produces.
  pub fn empty_file(name: impl Into<String>) -> Self {
    Self { name: name.into(), kind: NodeKind::File, content: None, children: None }
  }

  pub fn directory(name: impl Into<String>, children: Vec<ProjectNode>) -> Self {
    Self { name: name.into(), kind: NodeKind::Directory, content: None, children: Some(children) }
  }

  pub fn is_file(&self) -> bool {
    self.kind == NodeKind::File
  }
}
