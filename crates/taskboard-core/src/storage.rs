use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use tracing::{debug, error, warn};

use crate::reducer::Field;
use crate::task::{BoardState, Task};

pub const TASKS_KEY: &str = "todos";
pub const SHOW_COMPLETED_KEY: &str = "showCompleted";
pub const DARK_MODE_KEY: &str = "darkMode";

/// String-keyed, string-valued storage that outlives the process.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn field_key(field: Field) -> &'static str {
    match field {
        Field::Tasks => TASKS_KEY,
        Field::ShowCompleted => SHOW_COMPLETED_KEY,
        Field::DarkMode => DARK_MODE_KEY,
    }
}

pub fn encode_tasks(tasks: &[Task]) -> anyhow::Result<String> {
    serde_json::to_string(tasks).context("failed to encode task list")
}

/// Decodes a stored task list, dropping entries with blank text and later
/// entries whose id repeats an earlier one.
pub fn decode_tasks(raw: &str) -> anyhow::Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw).context("failed to parse stored task list")?;

    let before = tasks.len();
    let named: Vec<Task> = tasks
        .into_iter()
        .filter(|task| !task.text.trim().is_empty())
        .collect();
    if named.len() != before {
        warn!(
            dropped = before - named.len(),
            "stored task list contained blank tasks"
        );
    }

    let mut seen = BTreeSet::new();
    let before = named.len();
    let unique: Vec<Task> = named
        .into_iter()
        .filter(|task| seen.insert(task.id))
        .collect();
    if unique.len() != before {
        warn!(
            dropped = before - unique.len(),
            "stored task list contained duplicate ids"
        );
    }

    Ok(unique)
}

pub fn encode_bool(value: bool) -> String {
    value.to_string()
}

pub fn decode_bool(raw: &str) -> anyhow::Result<bool> {
    serde_json::from_str(raw.trim())
        .with_context(|| format!("expected \"true\" or \"false\", got {raw:?}"))
}

/// Reads every field, falling back to its default when absent, unreadable or
/// corrupt.
#[tracing::instrument(skip(store))]
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> BoardState {
    let defaults = BoardState::default();

    BoardState {
        tasks: load_field(store, TASKS_KEY, decode_tasks).unwrap_or(defaults.tasks),
        show_completed: load_field(store, SHOW_COMPLETED_KEY, decode_bool)
            .unwrap_or(defaults.show_completed),
        dark_mode: load_field(store, DARK_MODE_KEY, decode_bool).unwrap_or(defaults.dark_mode),
    }
}

fn load_field<S, T>(store: &S, key: &str, decode: fn(&str) -> anyhow::Result<T>) -> Option<T>
where
    S: KeyValueStore + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "nothing stored; using default");
            return None;
        }
        Err(err) => {
            warn!(key, error = %format!("{err:#}"), "failed reading stored value; using default");
            return None;
        }
    };

    match decode(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            error!(key, error = %format!("{err:#}"), "stored value is corrupt; using default");
            None
        }
    }
}

/// Writes the current value of one field.
pub fn persist_field<S: KeyValueStore + ?Sized>(
    store: &mut S,
    state: &BoardState,
    field: Field,
) -> anyhow::Result<()> {
    let value = match field {
        Field::Tasks => encode_tasks(&state.tasks)?,
        Field::ShowCompleted => encode_bool(state.show_completed),
        Field::DarkMode => encode_bool(state.dark_mode),
    };
    let key = field_key(field);
    store
        .save(key, &value)
        .with_context(|| format!("failed to save {key}"))
}
