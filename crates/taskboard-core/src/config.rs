use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const DEFAULT_PROGRESS_WIDTH: usize =
  30;

const DEFAULT_DATA_DIR: &str =
  "~/.taskboard";

/// Settings read from the boardrc chain plus `--rc` overrides.
#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

/// One meaningful line of a boardrc file.
#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Include(&'a str),
  Setting {
    key:   &'a str,
    value: &'a str
  }
}

impl Default for Config {
  fn default() -> Self {
    let map = [
      ("data.location", DEFAULT_DATA_DIR.to_string()),
      ("color", "on".to_string()),
      (
        "progress.width",
        DEFAULT_PROGRESS_WIDTH.to_string()
      )
    ]
    .into_iter()
    .map(|(key, value)| {
      (key.to_string(), value)
    })
    .collect();

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    boardrc_override
  ))]
  pub fn load(
    boardrc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    match locate_boardrc(
      boardrc_override
    ) {
      Some(path) => {
        info!(boardrc = %path.display(), "loading boardrc");
        cfg.read_rc(&path, &mut vec![])?;
      }
      None => {
        debug!("no boardrc; defaults only")
      }
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (raw_key, value) in overrides {
      let key = raw_key
        .strip_prefix("rc.")
        .map_or_else(
          || raw_key.clone(),
          str::to_string
        );
      debug!(key = %key, value = %value, "rc override");
      self.map.insert(key, value);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_usize(
    &self,
    key: &str
  ) -> anyhow::Result<Option<usize>> {
    let Some(raw) = self.map.get(key)
    else {
      return Ok(None);
    };
    raw
      .trim()
      .parse::<usize>()
      .map(Some)
      .with_context(|| {
        format!(
          "{key} must be a whole \
           number, got {raw:?}"
        )
      })
  }

  /// Reads one rc file. `chain` holds the canonical paths of the files
  /// currently open, outermost first.
  #[tracing::instrument(skip(
    self, chain
  ))]
  fn read_rc(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "cannot read boardrc {}",
            path.display()
          )
        })?;
    let canonical =
      fs::canonicalize(&path)
        .with_context(|| {
          format!(
            "cannot resolve {}",
            path.display()
          )
        })?;

    self.loaded_files.push(path.clone());
    chain.push(canonical);
    let outcome =
      self.apply_rc_text(&text, &path, chain);
    chain.pop();
    outcome
  }

  fn apply_rc_text(
    &mut self,
    text: &str,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let dir = path
      .parent()
      .unwrap_or(Path::new("."));

    for (idx, raw_line) in
      text.lines().enumerate()
    {
      let line_no = idx + 1;
      let parsed = parse_rc_line(raw_line)
        .with_context(|| {
          format!(
            "{}:{line_no}",
            path.display()
          )
        })?;

      match parsed {
        None => {}
        Some(RcLine::Setting {
          key,
          value
        }) => {
          trace!(key, value, "rc setting");
          self.map.insert(
            key.to_string(),
            value.to_string()
          );
        }
        Some(RcLine::Include(target)) => {
          let target =
            include_target(dir, target);
          if !target.exists() {
            warn!(include = %target.display(), "missing include skipped");
            continue;
          }

          let canonical =
            fs::canonicalize(&target)
              .with_context(|| {
                format!(
                  "cannot resolve {}",
                  target.display()
                )
              })?;
          if chain.contains(&canonical) {
            bail!(
              "include cycle at {}:{line_no}: {} is already being loaded",
              path.display(),
              target.display()
            );
          }

          debug!(include = %target.display(), line = line_no, "following include");
          self.read_rc(&target, chain)?;
        }
      }
    }

    Ok(())
  }
}

/// `None` for blank and comment-only lines.
fn parse_rc_line(
  raw: &str
) -> anyhow::Result<Option<RcLine<'_>>> {
  let line = match raw.find('#') {
    Some(at) => &raw[..at],
    None => raw
  }
  .trim();

  if line.is_empty() {
    return Ok(None);
  }

  if let Some(rest) =
    line.strip_prefix("include ")
  {
    let target = rest.trim();
    if target.is_empty() {
      bail!("include needs a path");
    }
    return Ok(Some(RcLine::Include(
      target
    )));
  }

  match line.split_once('=') {
    Some((key, value))
      if !key.trim().is_empty() =>
    {
      Ok(Some(RcLine::Setting {
        key:   key.trim(),
        value: value.trim()
      }))
    }
    _ => Err(anyhow!(
      "expected key=value, got {raw:?}"
    ))
  }
}

/// Picks the data directory and makes sure it exists.
#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = match override_dir {
    Some(dir) => dir.to_path_buf(),
    None => {
      let location = cfg
        .get("data.location")
        .unwrap_or_else(|| {
          DEFAULT_DATA_DIR.to_string()
        });
      expand_tilde(Path::new(&location))
    }
  };

  fs::create_dir_all(&dir)
    .with_context(|| {
      format!(
        "cannot create data directory \
         {}",
        dir.display()
      )
    })?;
  debug!(dir = %dir.display(), "data directory ready");

  Ok(dir)
}

/// `--boardrc`, then `$TASKBOARDRC` (`/dev/null` turns the file off), then
/// `~/.taskboardrc` when present.
fn locate_boardrc(
  explicit: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = explicit {
    return Some(path.to_path_buf());
  }

  match std::env::var_os("TASKBOARDRC") {
    Some(value) if value == "/dev/null" => {
      None
    }
    Some(value) => {
      Some(PathBuf::from(value))
    }
    None => {
      let Some(home) = dirs::home_dir()
      else {
        warn!("no home directory; boardrc skipped");
        return None;
      };
      Some(home.join(".taskboardrc"))
        .filter(|path| path.exists())
    }
  }
}

fn include_target(
  dir: &Path,
  target: &str
) -> PathBuf {
  let target =
    expand_tilde(Path::new(target));
  if target.is_relative() {
    dir.join(target)
  } else {
    target
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  match (
    path.strip_prefix("~"),
    dirs::home_dir()
  ) {
    (Ok(rest), Some(home)) => {
      home.join(rest)
    }
    _ => path.to_path_buf()
  }
}
