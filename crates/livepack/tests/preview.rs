use std::{sync::Arc, time::Duration};

use livepack::{
  FnTranspiler, GenerationId, MemoryResourceHost, PreviewController, PreviewEngine,
  PreviewErrorKind, PreviewOptions, PreviewStatus, ProjectNode, RebuildOutcome, Transpiler,
};
use serde_json::json;
use tokio::sync::Notify;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>App</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="./index.tsx"></script>
  </body>
</html>"#;

fn app_project() -> Vec<ProjectNode> {
  vec![
    ProjectNode::file("index.html", INDEX_HTML),
    ProjectNode::file(
      "index.tsx",
      "import App from './App';\nimport { createRoot } from 'react-dom/client';\n\
       createRoot(document.getElementById('root')!).render(<App />);",
    ),
    ProjectNode::file(
      "App.tsx",
      "import React from 'react';\nexport default function App() { return <main>hi</main>; }",
    ),
  ]
}

fn controller() -> PreviewController {
  PreviewController::new(PreviewEngine::new(PreviewOptions::default()))
}

fn live_count<T: Transpiler>(controller: &PreviewController<T>) -> usize {
  controller.engine().host().live_count()
}

#[tokio::test]
async fn builds_and_mounts_the_entry_document() {
  let controller = controller();
  let outcome = controller.set_project(app_project()).await;
  assert_eq!(outcome, RebuildOutcome::Ready(GenerationId::new(1)));

  let snapshot = controller.snapshot();
  assert_eq!(snapshot.status, PreviewStatus::Ready);
  assert!(!snapshot.is_loading());
  assert_eq!(snapshot.error_message, None);

  let mounted = controller.mounted().unwrap();
  assert_eq!(Some(mounted.src()), snapshot.preview_handle.as_ref());

  controller
    .with_generation(|generation| {
      let app = generation.modules().iter().find(|module| module.path == "App.tsx").unwrap();
      let index = generation.modules().iter().find(|module| module.path == "index.tsx").unwrap();

      let import_map = generation.import_map();
      assert_eq!(import_map.get("./App"), Some(app.handle.as_str()));
      assert_eq!(import_map.get("react"), Some("https://esm.sh/react@^19.2.3"));

      let compiled = generation.fetch(&app.handle).unwrap();
      assert!(compiled.text.contains("React.createElement"));

      let document = generation.entry_document().unwrap().text;
      assert!(document.contains(&format!(r#"<script type="module" src="{}"></script>"#, index.handle)));
      assert!(!document.contains(r#"src="./index.tsx""#));
      assert!(document.contains(r#"<script type="importmap">"#));
      assert!(document.contains("https://cdn.tailwindcss.com"));
      assert!(document.contains("preview-error"));
      assert!(document.contains("var generation = 1;"));
      assert_eq!(generation.resource_count(), 3);
    })
    .unwrap();

  assert_eq!(live_count(&controller), 3);
}

#[tokio::test]
async fn missing_entry_document_allocates_nothing() {
  let controller = controller();
  let outcome = controller
    .set_project(vec![ProjectNode::file("main.tsx", "export const a = 1;")])
    .await;
  assert_eq!(outcome, RebuildOutcome::Failed(GenerationId::new(1)));

  let snapshot = controller.snapshot();
  assert_eq!(snapshot.status, PreviewStatus::Failed);
  assert_eq!(snapshot.error_kind, Some(PreviewErrorKind::MissingEntryDocument));
  assert_eq!(
    snapshot.error_message.as_deref(),
    Some("No index.html found in the project. Project must have an entry index.html.")
  );
  assert!(controller.mounted().is_none());
  assert_eq!(live_count(&controller), 0);
}

#[tokio::test]
async fn compile_error_fails_the_whole_build() {
  let controller = controller();
  let mut project = app_project();
  project[2] = ProjectNode::file("App.tsx", "export default function App( {");

  assert_eq!(controller.set_project(project).await, RebuildOutcome::Failed(GenerationId::new(1)));
  let snapshot = controller.snapshot();
  assert_eq!(snapshot.error_kind, Some(PreviewErrorKind::Compile));
  assert!(snapshot.error_message.unwrap().starts_with("Failed to compile App.tsx: "));
  assert_eq!(snapshot.preview_handle, None);
  assert_eq!(live_count(&controller), 0);
}

#[tokio::test]
async fn failed_rebuild_tears_down_the_previous_preview() {
  let controller = controller();
  controller.set_project(app_project()).await;
  assert!(controller.mounted().is_some());

  let outcome = controller.set_project(vec![ProjectNode::file("App.tsx", "")]).await;
  assert_eq!(outcome, RebuildOutcome::Failed(GenerationId::new(2)));
  assert!(controller.mounted().is_none());
  assert!(controller.with_generation(|_| ()).is_none());
  assert_eq!(live_count(&controller), 0);
}

#[tokio::test]
async fn rebuilds_release_previous_generations() {
  let controller = controller();
  controller.set_project(app_project()).await;
  let first_handle = controller.mounted().unwrap().src().clone();

  for raw in 2..=6 {
    assert_eq!(controller.rebuild().await, RebuildOutcome::Ready(GenerationId::new(raw)));
    let resources = controller.with_generation(|generation| generation.resource_count()).unwrap();
    assert_eq!(live_count(&controller), resources);
  }

  assert!(controller.engine().host().fetch(&first_handle).is_none());
  assert_ne!(controller.mounted().unwrap().src(), &first_handle);
}

#[tokio::test]
async fn rebuild_without_project_does_nothing() {
  let controller = controller();
  assert_eq!(controller.rebuild().await, RebuildOutcome::NoProject);
  assert_eq!(controller.snapshot().status, PreviewStatus::Idle);
}

#[tokio::test]
async fn malformed_project_tree_still_builds() {
  let project = livepack::read_project_tree(&json!([
    { "name": "index.html", "type": "file", "content": INDEX_HTML },
    { "name": "index.tsx", "type": "file", "content": "console.log('hi');" },
    { "name": "notes.txt", "type": "file", "content": 42 },
    { "name": "assets", "type": "folder", "children": "nope" },
    { "type": "file", "content": "nameless" },
  ]));

  let controller = controller();
  assert_eq!(controller.set_project(project).await, RebuildOutcome::Ready(GenerationId::new(1)));
  controller
    .with_generation(|generation| {
      let notes = generation.modules().iter().find(|module| module.path == "notes.txt").unwrap();
      assert_eq!(generation.fetch(&notes.handle).unwrap().text, "");
    })
    .unwrap();
}

#[tokio::test]
async fn runtime_error_keeps_the_preview_mounted() {
  let controller = controller();
  controller.set_project(app_project()).await;
  let mounted = controller.mounted().unwrap();

  assert!(mounted.port().post(&json!({
    "type": "preview-error",
    "message": "Cannot read properties of undefined",
    "generation": 1,
  })));
  assert_eq!(controller.drain_messages(), 1);

  let snapshot = controller.snapshot();
  assert_eq!(snapshot.status, PreviewStatus::Failed);
  assert_eq!(snapshot.error_kind, Some(PreviewErrorKind::Runtime));
  assert_eq!(snapshot.error_message.as_deref(), Some("Cannot read properties of undefined"));
  assert_eq!(snapshot.preview_handle.as_ref(), Some(mounted.src()));
  assert!(controller.mounted().is_some());
  assert_eq!(live_count(&controller), 3);
}

#[tokio::test]
async fn messages_from_stale_sandboxes_are_ignored() {
  let controller = controller();
  controller.set_project(app_project()).await;
  let stale_port = controller.mounted().unwrap().port();

  controller.rebuild().await;
  assert!(stale_port.post(&json!({ "type": "preview-error", "message": "late" })));
  assert_eq!(controller.drain_messages(), 0);

  let snapshot = controller.snapshot();
  assert_eq!(snapshot.status, PreviewStatus::Ready);
  assert_eq!(snapshot.generation, Some(GenerationId::new(2)));
}

#[tokio::test]
async fn next_message_waits_for_the_sandbox() {
  let controller = controller();
  controller.set_project(app_project()).await;
  let port = controller.mounted().unwrap().port();

  let (applied, posted) = tokio::join!(controller.next_message(), async {
    port.post(&json!({ "type": "preview-error", "message": null }))
  });
  assert!(posted);
  assert_eq!(applied, Some(true));
  assert_eq!(controller.snapshot().error_message.as_deref(), Some("Unknown error"));
}

struct Gated {
  gate: Arc<Notify>,
}

impl Transpiler for Gated {
  async fn transpile(&self, source: &str, _path: &str) -> anyhow::Result<String> {
    if source.contains("slow") {
      self.gate.notified().await;
    }
    Ok(source.to_string())
  }
}

#[tokio::test]
async fn superseded_build_is_discarded() {
  let gate = Arc::new(Notify::new());
  let host = Arc::new(MemoryResourceHost::default());
  let engine = PreviewEngine::with_parts(
    PreviewOptions::default(),
    Gated { gate: Arc::clone(&gate) },
    host,
  );
  let controller = PreviewController::new(engine);

  let slow = vec![
    ProjectNode::file("index.html", INDEX_HTML),
    ProjectNode::file("index.tsx", "// slow"),
  ];
  let fast = vec![
    ProjectNode::file("index.html", INDEX_HTML),
    ProjectNode::file("index.tsx", "// fast"),
  ];

  let (first, second) = tokio::join!(controller.set_project(slow), async {
    tokio::task::yield_now().await;
    let outcome = controller.set_project(fast).await;
    gate.notify_one();
    outcome
  });

  assert_eq!(first, RebuildOutcome::Superseded(GenerationId::new(1)));
  assert_eq!(second, RebuildOutcome::Ready(GenerationId::new(2)));

  let snapshot = controller.snapshot();
  assert_eq!(snapshot.status, PreviewStatus::Ready);
  assert_eq!(snapshot.generation, Some(GenerationId::new(2)));
  let resources = controller.with_generation(|generation| generation.resource_count()).unwrap();
  assert_eq!(live_count(&controller), resources);
}

struct Stalled;

impl Transpiler for Stalled {
  async fn transpile(&self, _source: &str, _path: &str) -> anyhow::Result<String> {
    futures::future::pending().await
  }
}

#[tokio::test(start_paused = true)]
async fn stalled_transpiler_times_out() {
  let options =
    PreviewOptions { transpile_timeout: Some(Duration::from_secs(1)), ..PreviewOptions::default() };
  let engine =
    PreviewEngine::with_parts(options, Stalled, Arc::new(MemoryResourceHost::default()));
  let controller = PreviewController::new(engine);

  assert_eq!(
    controller.set_project(app_project()).await,
    RebuildOutcome::Failed(GenerationId::new(1))
  );
  assert_eq!(controller.snapshot().error_kind, Some(PreviewErrorKind::TranspileTimeout));
  assert_eq!(live_count(&controller), 0);
}

#[tokio::test]
async fn shutdown_releases_everything() {
  let controller = controller();
  controller.set_project(app_project()).await;
  let mut updates = controller.subscribe();

  controller.shutdown();
  assert!(updates.has_changed().unwrap());
  assert_eq!(updates.borrow_and_update().status, PreviewStatus::Idle);
  assert!(controller.mounted().is_none());
  assert_eq!(live_count(&controller), 0);
  assert_eq!(controller.rebuild().await, RebuildOutcome::NoProject);
}

#[tokio::test]
async fn custom_transpiler_and_options() {
  let options = PreviewOptions {
    entry_filename: Some("preview.html".to_string()),
    inject_stylesheet_loader: Some(false),
    ..PreviewOptions::default()
  };
  let engine = PreviewEngine::with_parts(
    options,
    FnTranspiler::new(|source: &str, _path: &str| Ok(source.to_uppercase())),
    Arc::new(MemoryResourceHost::new("custom")),
  );
  let controller = PreviewController::new(engine);

  let project = vec![ProjectNode::directory(
    "site",
    vec![
      ProjectNode::file("preview.html", r#"<head></head><script src="main.ts"></script>"#),
      ProjectNode::file("main.ts", "let a = 1;"),
    ],
  )];
  assert_eq!(controller.set_project(project).await, RebuildOutcome::Ready(GenerationId::new(1)));

  controller
    .with_generation(|generation| {
      assert_eq!(generation.entry_path(), "site/preview.html");
      assert!(generation.entry_handle().as_str().starts_with("blob:custom/"));
      let main = generation.modules().iter().find(|module| module.path == "site/main.ts").unwrap();
      assert_eq!(generation.fetch(&main.handle).unwrap().text, "LET A = 1;");

      let document = generation.entry_document().unwrap().text;
      assert!(document.contains(main.handle.as_str()));
      assert!(!document.contains("tailwindcss"));
    })
    .unwrap();
}
