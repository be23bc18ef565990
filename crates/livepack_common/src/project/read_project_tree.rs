use serde_json::Value;

use super::project_node::{NodeKind, ProjectNode};

/// Reads a project tree from untrusted JSON.
///
/// Never fails: a node that cannot be understood is dropped together with its subtree and
/// the rest of the tree is kept. Accepts either an array of root nodes or a single node.
pub fn read_project_tree(value: &Value) -> Vec<ProjectNode> {
  match value {
    Value::Array(nodes) => nodes.iter().filter_map(read_node).collect(),
    Value::Object(_) => read_node(value).into_iter().collect(),
    _ => vec![],
  }
}

pub fn read_project_tree_str(json: &str) -> anyhow::Result<Vec<ProjectNode>> {
  let value = serde_json::from_str::<Value>(json)?;
  Ok(read_project_tree(&value))
}

fn read_node(value: &Value) -> Option<ProjectNode> {
  let object = value.as_object()?;
  let name = object.get("name")?.as_str()?.to_string();

  let raw_kind = object.get("type").or_else(|| object.get("kind")).and_then(Value::as_str);
  let content = object.get("content").and_then(Value::as_str).map(ToString::to_string);
  let children = object.get("children");

  let kind = match raw_kind {
    Some("file") => NodeKind::File,
    Some("directory" | "folder") => NodeKind::Directory,
    _ => match (children, &content) {
      (Some(Value::Array(_)), _) => NodeKind::Directory,
      (_, Some(_)) => NodeKind::File,
      _ => return None,
    },
  };

  let children = match (kind, children) {
    (NodeKind::Directory, Some(Value::Array(children))) => {
      Some(children.iter().filter_map(read_node).collect())
    }
    // Non-array children: keep the directory, drop the subtree.
    (NodeKind::Directory, _) => Some(vec![]),
    (NodeKind::File, _) => None,
  };

  let content = if kind == NodeKind::File { content } else { None };

  Some(ProjectNode { name, kind, content, children })
}

#[test]
fn test_read_project_tree_is_lenient() {
  let value = serde_json::json!([
    { "name": "index.html", "type": "file", "content": "<html></html>" },
    { "name": "src", "type": "folder", "children": [
      { "name": "App.tsx", "type": "file", "content": 42 },
      { "type": "file", "content": "nameless" },
      { "name": "broken", "type": "folder", "children": "not-an-array" },
    ]},
    { "name": "README", "content": "guessed file" },
    "garbage",
  ]);

  let tree = read_project_tree(&value);
  assert_eq!(tree.len(), 3);
  assert_eq!(tree[0], ProjectNode::file("index.html", "<html></html>"));

  let src = tree[1].children.as_ref().unwrap();
  assert_eq!(src.len(), 2);
  assert_eq!(src[0], ProjectNode::empty_file("App.tsx"));
  assert_eq!(src[1], ProjectNode::directory("broken", vec![]));

  assert_eq!(tree[2], ProjectNode::file("README", "guessed file"));
}

#[test]
fn test_read_project_tree_single_root() {
  let tree = read_project_tree_str(r#"{ "name": "app", "kind": "directory", "children": [] }"#)
    .unwrap();
  assert_eq!(tree, vec![ProjectNode::directory("app", vec![])]);
  assert!(read_project_tree_str("not json").is_err());
}
