use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InputArgs {
  /// JSON file holding the project tree.
  #[clap(long, short = 'p')]
  pub project: PathBuf,

  /// File name of the entry document.
  #[clap(long, short = 'e')]
  pub entry: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Writes the rewritten entry document and every compiled unit here.
  #[clap(long, short = 'd')]
  pub out_dir: Option<PathBuf>,

  #[clap(long)]
  pub no_stylesheet_loader: bool,

  /// Transpile timeout in milliseconds. `0` disables it.
  #[clap(long)]
  pub timeout_ms: Option<u64>,

  #[clap(long, short = 's')]
  pub silent: bool,
}
