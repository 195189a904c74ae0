use tracing::{debug, trace};

use crate::task::{BoardState, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTask { id: TaskId, text: String },
    ToggleCompleted(TaskId),
    DeleteTask(TaskId),
    ReorderTask {
        source: usize,
        destination: Option<usize>,
    },
    ToggleShowCompleted,
    ToggleDarkMode,
}

/// A persisted part of [`BoardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Tasks,
    ShowCompleted,
    DarkMode,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Tasks, Field::ShowCompleted, Field::DarkMode];
}

/// Which fields an action touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    tasks: bool,
    show_completed: bool,
    dark_mode: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(field: Field) -> Self {
        let mut changes = Self::default();
        match field {
            Field::Tasks => changes.tasks = true,
            Field::ShowCompleted => changes.show_completed = true,
            Field::DarkMode => changes.dark_mode = true,
        }
        changes
    }

    pub fn contains(&self, field: Field) -> bool {
        match field {
            Field::Tasks => self.tasks,
            Field::ShowCompleted => self.show_completed,
            Field::DarkMode => self.dark_mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.tasks || self.show_completed || self.dark_mode)
    }

    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

/// Applies `action` to `state`. Never fails; anything that does not apply
/// leaves the state alone and reports no changes.
pub fn reduce(state: &mut BoardState, action: Action) -> Changes {
    trace!(?action, "reducing");
    match action {
        Action::AddTask { id, text } => add_task(state, id, &text),
        Action::ToggleCompleted(id) => {
            let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
                debug!(id, "toggle ignored: no such task");
                return Changes::none();
            };
            task.completed = !task.completed;
            Changes::only(Field::Tasks)
        }
        Action::DeleteTask(id) => {
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id != id);
            if state.tasks.len() == before {
                debug!(id, "delete ignored: no such task");
                return Changes::none();
            }
            Changes::only(Field::Tasks)
        }
        Action::ReorderTask {
            source,
            destination,
        } => reorder(&mut state.tasks, source, destination),
        Action::ToggleShowCompleted => {
            state.show_completed = !state.show_completed;
            Changes::only(Field::ShowCompleted)
        }
        Action::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            Changes::only(Field::DarkMode)
        }
    }
}

fn add_task(state: &mut BoardState, id: TaskId, text: &str) -> Changes {
    let text = text.trim();
    if text.is_empty() {
        debug!("add ignored: blank text");
        return Changes::none();
    }
    if state.position(id).is_some() {
        debug!(id, "add ignored: id already in use");
        return Changes::none();
    }

    state.tasks.push(Task::new(id, text.to_string()));
    Changes::only(Field::Tasks)
}

fn reorder(tasks: &mut Vec<Task>, source: usize, destination: Option<usize>) -> Changes {
    let Some(destination) = destination else {
        debug!(source, "reorder ignored: no destination");
        return Changes::none();
    };
    if source >= tasks.len() {
        debug!(source, len = tasks.len(), "reorder ignored: source out of range");
        return Changes::none();
    }

    let destination = destination.min(tasks.len() - 1);
    if destination == source {
        return Changes::none();
    }

    let moved = tasks.remove(source);
    tasks.insert(destination, moved);
    Changes::only(Field::Tasks)
}
