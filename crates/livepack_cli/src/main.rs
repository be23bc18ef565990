mod args;

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
  time::{Duration, Instant},
};

use ansi_term::Colour;
use args::{InputArgs, OutputArgs};
use clap::Parser;
use livepack::{
  read_project_tree_str, BuildGeneration, GenerationId, PreviewEngine, PreviewOptions,
};
use livepack_utils::path_ext::join_slash;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

fn print_resources(generation: &BuildGeneration) {
  let mut rows = Vec::with_capacity(generation.modules().len() + 1);
  let resources = generation.modules().iter().chain(std::iter::once(generation.entry()));
  for resource in resources {
    let Some(blob) = generation.fetch(&resource.handle) else {
      continue;
    };
    let size = format!("{:.2}", blob.text.len() as f64 / 1024.0);
    rows.push((resource.path.as_str(), blob.mime.essence_str().to_string(), size));
  }

  let left = rows.iter().map(|(path, ..)| path.len()).max().unwrap_or_default();
  let middle = rows.iter().map(|(_, mime, _)| mime.len()).max().unwrap_or_default();
  let right = rows.iter().map(|(.., size)| size.len()).max().unwrap_or_default();

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (path, mime, size) in rows {
    println!(
      "{}{:left$} {}{:middle$}{}{:>right$} kB",
      color.paint(path),
      "",
      dim.paint(mime.as_str()),
      "",
      dim.paint(" │ size: "),
      size,
      left = left - path.len(),
      middle = middle - mime.len(),
    );
  }
}

/// `path` under `out_dir`, or `None` when it would land outside of it.
fn out_path(out_dir: &Path, path: &str) -> Option<PathBuf> {
  join_slash("", path)
    .filter(|normalized| !matches!(normalized.as_str(), "" | "."))
    .map(|normalized| out_dir.join(normalized))
}

fn write_out_dir(generation: &BuildGeneration, out_dir: &Path) -> anyhow::Result<()> {
  let resources = generation.modules().iter().chain(std::iter::once(generation.entry()));
  for resource in resources {
    let Some(blob) = generation.fetch(&resource.handle) else {
      continue;
    };
    let Some(target) = out_path(out_dir, &resource.path) else {
      anyhow::bail!("refusing to write `{}` outside the output directory", resource.path);
    };
    if let Some(parent) = target.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, blob.text.as_bytes())?;
  }
  Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let args = Commands::parse();
  let InputArgs { project, entry } = args.input;

  let nodes = match std::fs::read_to_string(&project)
    .map_err(anyhow::Error::from)
    .and_then(|json| read_project_tree_str(&json))
  {
    Ok(nodes) => nodes,
    Err(err) => {
      println!("{} Cannot read {}: {err}", Colour::Red.paint("Error:"), project.display());
      return ExitCode::FAILURE;
    }
  };

  let engine = PreviewEngine::new(PreviewOptions {
    entry_filename: entry,
    inject_stylesheet_loader: Some(!args.output.no_stylesheet_loader),
    transpile_timeout: args.output.timeout_ms.map(Duration::from_millis),
    ..PreviewOptions::default()
  });

  let start = Instant::now();
  let generation = match engine.build(&nodes, GenerationId::new(1)).await {
    Ok(generation) => generation,
    Err(errors) => {
      for error in &*errors {
        println!("{} {}", Colour::Red.paint("Error:"), error);
      }
      return ExitCode::FAILURE;
    }
  };

  if !args.output.silent {
    for warning in generation.warnings() {
      println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
    }
    print_resources(&generation);
  }

  if let Some(out_dir) = &args.output.out_dir {
    if let Err(err) = write_out_dir(&generation, out_dir) {
      println!("{} Cannot write {}: {err}", Colour::Red.paint("Error:"), out_dir.display());
      return ExitCode::FAILURE;
    }
  }

  let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
  println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
  ExitCode::SUCCESS
}

#[test]
fn test_out_path_stays_inside_out_dir() {
  let out_dir = Path::new("dist");
  assert_eq!(out_path(out_dir, "src/App.tsx"), Some(PathBuf::from("dist/src/App.tsx")));
  assert_eq!(out_path(out_dir, "a/../b.js"), Some(PathBuf::from("dist/b.js")));
  assert_eq!(out_path(out_dir, "../../escape.js"), None);
  assert_eq!(out_path(out_dir, "a/../../escape.js"), None);
  assert_eq!(out_path(out_dir, "/etc/passwd"), None);
}
