use livepack_common::{FlatFileMap, NodeKind, ProjectNode};

/// Flattens a project tree into `path -> source`, depth-first.
///
/// Nodes without a usable name are skipped with their whole subtree. A name is unusable when
/// it is empty or has an empty, `.` or `..` segment. A file without content becomes an empty
/// file.
pub fn flatten_project(nodes: &[ProjectNode]) -> FlatFileMap {
  let mut files = FlatFileMap::default();
  flatten_into(&mut files, nodes, "");
  tracing::debug!(files = files.len(), "flattened project tree");
  files
}

fn flatten_into(files: &mut FlatFileMap, nodes: &[ProjectNode], parent: &str) {
  for node in nodes {
    let name = node.name.trim_matches('/');
    if name.is_empty() {
      tracing::debug!(parent, "skipping project node without a name");
      continue;
    }
    if name.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
      tracing::debug!(parent, name, "skipping project node with a relative name");
      continue;
    }

    let path = if parent.is_empty() { name.to_string() } else { format!("{parent}/{name}") };

    match node.kind {
      NodeKind::File => {
        files.insert(path, node.content.clone().unwrap_or_default());
      }
      NodeKind::Directory => {
        if let Some(children) = &node.children {
          flatten_into(files, children, &path);
        }
      }
    }
  }
}

#[test]
fn test_flatten_project() {
  let tree = vec![
    ProjectNode::file("index.html", "<html></html>"),
    ProjectNode::directory(
      "src",
      vec![
        ProjectNode::file("App.tsx", "export default 1"),
        ProjectNode::directory("components", vec![ProjectNode::file("Button.tsx", "b")]),
      ],
    ),
    ProjectNode::file("", "nameless"),
    ProjectNode::directory("/styles/", vec![ProjectNode::empty_file("app.css")]),
  ];

  let files = flatten_project(&tree);
  assert_eq!(
    files.keys().map(String::as_str).collect::<Vec<_>>(),
    vec!["index.html", "src/App.tsx", "src/components/Button.tsx", "styles/app.css"]
  );
  assert_eq!(files["src/components/Button.tsx"], "b");
  assert_eq!(files["styles/app.css"], "");

  // Idempotent and order preserving.
  assert_eq!(flatten_project(&tree), files);
}

#[test]
fn test_flatten_duplicate_names_last_write_wins() {
  let tree = vec![ProjectNode::file("a.js", "first"), ProjectNode::file("a.js", "second")];
  let files = flatten_project(&tree);
  assert_eq!(files.len(), 1);
  assert_eq!(files["a.js"], "second");
}

#[test]
fn test_flatten_skips_relative_names() {
  let tree = vec![
    ProjectNode::file("index.html", ""),
    ProjectNode::file("../../escape.js", "x"),
    ProjectNode::file("./here.js", "x"),
    ProjectNode::file("a//b.js", "x"),
    ProjectNode::directory("..", vec![ProjectNode::file("up.js", "x")]),
    ProjectNode::directory("lib/utils", vec![ProjectNode::file("fmt.js", "x")]),
  ];

  let files = flatten_project(&tree);
  assert_eq!(
    files.keys().map(String::as_str).collect::<Vec<_>>(),
    vec!["index.html", "lib/utils/fmt.js"]
  );
}
