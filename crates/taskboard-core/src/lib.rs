pub mod board;
pub mod drag;
pub mod reducer;
pub mod storage;
pub mod task;
pub mod view;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod commands;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod file_store;
#[cfg(feature = "native")]
pub mod render;

pub use board::Board;
pub use drag::DragHandler;
pub use storage::KeyValueStore;
pub use task::{BoardState, Task, TaskId};

#[cfg(feature = "native")]
#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<std::ffi::OsString>
) -> anyhow::Result<()> {
  use anyhow::Context;
  use clap::Parser;
  use tracing::{
    debug,
    info
  };

  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskboard CLI"
  );

  let mut cfg = config::Config::load(
    cli.boardrc.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let store =
    file_store::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open storage at {}",
        data_dir.display()
      )
    })?;

  let mut board = Board::open(store);
  let renderer =
    render::Renderer::new(&cfg)?;
  let command = cli
    .command
    .unwrap_or(cli::Command::List);
  debug!(?command, "resolved command");

  commands::dispatch(
    &mut board,
    &renderer,
    command,
    std::io::stdout().lock()
  )?;

  info!("done");
  Ok(())
}
