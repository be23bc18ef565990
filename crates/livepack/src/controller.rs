use std::sync::Arc;

use livepack_common::{
  GenerationId, PreviewSnapshot, PreviewStatus, ProjectNode, SandboxMessage, Transpiler,
};
use livepack_ecmascript::OxcTranspiler;
use livepack_error::PreviewError;
use parking_lot::Mutex;
use tokio::sync::{mpsc::UnboundedReceiver, watch};

use crate::{
  engine::PreviewEngine,
  sandbox::{MountedSandbox, SandboxEnvelope, SandboxHost},
  types::build_generation::BuildGeneration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
  Ready(GenerationId),
  Failed(GenerationId),
  /// A newer generation started before this one finished. Its result was thrown away.
  Superseded(GenerationId),
  NoProject,
}

#[derive(Default)]
struct ControllerState {
  /// Most recently started generation. Only its result may be installed.
  latest: GenerationId,
  project: Option<Arc<Vec<ProjectNode>>>,
  current: Option<BuildGeneration>,
  mounted: Option<MountedSandbox>,
  in_flight: usize,
}

/// Drives the preview through `Idle -> Building -> Ready | Failed`.
///
/// Every change of input starts a new generation; the previous one is released before the
/// pipeline runs, so a failed build never leaves a stale preview behind. The current state is
/// published as a [`PreviewSnapshot`] on a watch channel.
pub struct PreviewController<T: Transpiler = OxcTranspiler> {
  engine: PreviewEngine<T>,
  sandbox: SandboxHost,
  inbox: tokio::sync::Mutex<UnboundedReceiver<SandboxEnvelope>>,
  state: Mutex<ControllerState>,
  snapshot: watch::Sender<PreviewSnapshot>,
}

impl<T: Transpiler> PreviewController<T> {
  pub fn new(engine: PreviewEngine<T>) -> Self {
    let (sandbox, inbox) = SandboxHost::new(engine.options.sandbox);
    let (snapshot, _) = watch::channel(PreviewSnapshot::default());

    Self {
      engine,
      sandbox,
      inbox: tokio::sync::Mutex::new(inbox),
      state: Mutex::new(ControllerState::default()),
      snapshot,
    }
  }

  pub fn engine(&self) -> &PreviewEngine<T> {
    &self.engine
  }

  pub fn subscribe(&self) -> watch::Receiver<PreviewSnapshot> {
    self.snapshot.subscribe()
  }

  pub fn snapshot(&self) -> PreviewSnapshot {
    self.snapshot.borrow().clone()
  }

  pub fn mounted(&self) -> Option<MountedSandbox> {
    self.state.lock().mounted.clone()
  }

  /// Runs `func` against the installed generation, if any.
  pub fn with_generation<R>(&self, func: impl FnOnce(&BuildGeneration) -> R) -> Option<R> {
    self.state.lock().current.as_ref().map(func)
  }

  /// Replaces the input project and builds it.
  pub async fn set_project(&self, project: Vec<ProjectNode>) -> RebuildOutcome {
    let project = Arc::new(project);
    self.state.lock().project = Some(Arc::clone(&project));
    self.run_generation(project).await
  }

  /// Builds the current input project again from scratch.
  pub async fn rebuild(&self) -> RebuildOutcome {
    let project = self.state.lock().project.as_ref().map(Arc::clone);
    match project {
      Some(project) => self.run_generation(project).await,
      None => RebuildOutcome::NoProject,
    }
  }

  async fn run_generation(&self, project: Arc<Vec<ProjectNode>>) -> RebuildOutcome {
    let generation = self.begin_generation();
    let in_flight = InFlight(&self.state);

    let result = self.engine.build(&project, generation).await;
    drop(in_flight);

    let mut state = self.state.lock();
    if state.latest != generation {
      drop(state);
      tracing::debug!(%generation, "discarding result of superseded build");
      return RebuildOutcome::Superseded(generation);
    }

    match result {
      Ok(build) => {
        let mounted = self.sandbox.mount(generation, build.entry_handle().clone());
        self.snapshot.send_replace(PreviewSnapshot {
          status: PreviewStatus::Ready,
          generation: Some(generation),
          error_message: None,
          error_kind: None,
          preview_handle: Some(mounted.src().clone()),
          warnings: build.warnings().iter().map(ToString::to_string).collect(),
        });
        state.mounted = Some(mounted);
        state.current = Some(build);
        RebuildOutcome::Ready(generation)
      }
      Err(err) => {
        tracing::error!(%generation, kind = ?err.kind(), "preview build failed: {err}");
        self.snapshot.send_replace(PreviewSnapshot {
          status: PreviewStatus::Failed,
          generation: Some(generation),
          error_message: Some(err.message()),
          error_kind: Some(err.kind()),
          preview_handle: None,
          warnings: vec![],
        });
        RebuildOutcome::Failed(generation)
      }
    }
  }

  /// Claims the next generation id and tears down the installed one.
  fn begin_generation(&self) -> GenerationId {
    let mut state = self.state.lock();
    let generation = state.latest.next();
    state.latest = generation;
    state.in_flight += 1;
    state.mounted = None;
    if let Some(previous) = state.current.take() {
      tracing::debug!(generation = %previous.id(), "releasing previous generation");
      drop(previous);
    }

    self.snapshot.send_replace(PreviewSnapshot {
      status: PreviewStatus::Building,
      generation: Some(generation),
      ..PreviewSnapshot::default()
    });
    generation
  }

  /// Applies one message from a sandbox. Returns whether it changed anything.
  ///
  /// Only the sandbox of the installed generation is listened to. A runtime error flips a
  /// ready preview to `Failed` but leaves it mounted.
  pub fn handle_message(&self, envelope: SandboxEnvelope) -> bool {
    let state = self.state.lock();
    let is_current =
      state.mounted.as_ref().is_some_and(|mounted| mounted.generation() == envelope.generation);
    if !is_current {
      tracing::warn!(generation = %envelope.generation, "ignoring message from a stale sandbox");
      return false;
    }

    let SandboxMessage::PreviewError { message, .. } = envelope.message;
    tracing::warn!(
      generation = %envelope.generation,
      message = message.as_str(),
      "runtime error in preview"
    );
    let error = PreviewError::Runtime { message };
    self.snapshot.send_modify(|snapshot| {
      snapshot.status = PreviewStatus::Failed;
      snapshot.error_message = Some(error.to_string());
      snapshot.error_kind = Some(error.kind());
    });
    true
  }

  /// Applies every message already waiting in the inbox.
  pub fn drain_messages(&self) -> usize {
    let Ok(mut inbox) = self.inbox.try_lock() else {
      return 0;
    };
    let mut applied = 0;
    while let Ok(envelope) = inbox.try_recv() {
      if self.handle_message(envelope) {
        applied += 1;
      }
    }
    applied
  }

  /// Waits for the next sandbox message and applies it.
  pub async fn next_message(&self) -> Option<bool> {
    let envelope = self.inbox.lock().await.recv().await?;
    Some(self.handle_message(envelope))
  }

  /// Releases everything and returns to `Idle`. Builds still in flight are discarded when
  /// they finish.
  pub fn shutdown(&self) {
    let mut state = self.state.lock();
    state.latest = state.latest.next();
    state.project = None;
    state.mounted = None;
    let released = state.current.take();
    let in_flight = state.in_flight;
    drop(state);
    drop(released);

    self.snapshot.send_replace(PreviewSnapshot::default());

    if in_flight == 0 {
      let live = self.engine.host.live_count();
      if live != 0 {
        tracing::error!("{}", PreviewError::ResourceLeak { live });
      }
    }
  }
}

struct InFlight<'a>(&'a Mutex<ControllerState>);

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.lock().in_flight -= 1;
  }
}
