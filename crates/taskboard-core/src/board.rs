use tracing::{debug, info, warn};

use crate::drag::{DragHandler, DragOutcome, DragSession};
use crate::reducer::{Action, Changes, reduce};
use crate::storage::{KeyValueStore, load_state, persist_field};
use crate::task::{BoardState, IdGenerator, Task, TaskId};
use crate::view::{self, Progress};

/// The task board: owns the state, runs every mutation through [`reduce`]
/// and then writes back exactly the fields that changed.
#[derive(Debug)]
pub struct Board<S: KeyValueStore> {
    state: BoardState,
    input: String,
    ids: IdGenerator,
    drag: DragSession,
    store: S,
}

impl<S: KeyValueStore> Board<S> {
    #[tracing::instrument(skip(store))]
    pub fn open(store: S) -> Self {
        let state = load_state(&store);
        info!(
            tasks = state.tasks.len(),
            show_completed = state.show_completed,
            dark_mode = state.dark_mode,
            "loaded board"
        );
        Self::with_state(store, state)
    }

    pub fn with_state(store: S, state: BoardState) -> Self {
        Self {
            state,
            input: String::new(),
            ids: IdGenerator::default(),
            drag: DragSession::default(),
            store,
        }
    }

    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Adds whatever is in the input field.
    pub fn submit_input(&mut self) -> Option<TaskId> {
        let text = std::mem::take(&mut self.input);
        let added = self.add_task(&text);
        if added.is_none() {
            self.input = text;
        }
        added
    }

    /// Appends a task; blank text is ignored.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            debug!("add ignored: blank text");
            return None;
        }
        let id = self.ids.next_id(&self.state.tasks);
        let changes = self.dispatch(Action::AddTask {
            id,
            text: text.to_string(),
        });
        if changes.is_empty() {
            return None;
        }
        self.input.clear();
        Some(id)
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        !self.dispatch(Action::ToggleCompleted(id)).is_empty()
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        !self.dispatch(Action::DeleteTask(id)).is_empty()
    }

    /// Moves within the full task list.
    pub fn reorder_task(&mut self, source: usize, destination: Option<usize>) -> bool {
        !self
            .dispatch(Action::ReorderTask {
                source,
                destination,
            })
            .is_empty()
    }

    /// Moves between displayed positions, translating through the filter.
    pub fn move_displayed(&mut self, source: usize, destination: usize) -> bool {
        let Some((from, to)) = view::translate_move(&self.state, source, destination) else {
            debug!(source, destination, "move ignored: source not displayed");
            return false;
        };
        self.reorder_task(from, Some(to))
    }

    pub fn toggle_show_completed(&mut self) -> bool {
        self.dispatch(Action::ToggleShowCompleted);
        self.state.show_completed
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dispatch(Action::ToggleDarkMode);
        self.state.dark_mode
    }

    pub fn displayed_tasks(&self) -> Vec<&Task> {
        view::displayed_tasks(&self.state)
    }

    pub fn progress(&self) -> Progress {
        Progress::of(&self.state.tasks)
    }

    pub fn drag_origin(&self) -> Option<usize> {
        self.drag.origin()
    }

    /// Abandons an in-flight drag, if any.
    pub fn cancel_drag(&mut self) {
        if self.drag.cancel() == DragOutcome::Cancelled {
            debug!("drag cancelled");
        }
    }

    fn dispatch(&mut self, action: Action) -> Changes {
        let changes = reduce(&mut self.state, action);
        self.persist(changes);
        changes
    }

    fn persist(&mut self, changes: Changes) {
        for field in changes.fields() {
            if let Err(err) = persist_field(&mut self.store, &self.state, field) {
                warn!(
                    ?field,
                    error = %format!("{err:#}"),
                    "failed to persist; keeping in-memory state"
                );
            }
        }
    }
}

impl<S: KeyValueStore> DragHandler for Board<S> {
    fn on_drag_start(&mut self, index: usize) {
        if self.drag.start(index) {
            debug!(index, "drag started");
        }
    }

    fn on_drag_end(&mut self, source: usize, destination: Option<usize>) {
        match self.drag.finish(source, destination) {
            DragOutcome::Commit {
                source,
                destination,
            } => {
                let moved = self.move_displayed(source, destination);
                debug!(source, destination, moved, "drag committed");
            }
            DragOutcome::Cancelled => debug!(source, "drag cancelled"),
            DragOutcome::Ignored => {}
        }
    }
}
