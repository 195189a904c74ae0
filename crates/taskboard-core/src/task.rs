use chrono::Utc;
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,

    pub text: String,

    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Everything the board owns. Order of `tasks` is both display and storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub show_completed: bool,
    pub dark_mode: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: seed_tasks(),
            show_completed: true,
            dark_mode: false,
        }
    }
}

impl BoardState {
    pub fn empty() -> Self {
        Self {
            tasks: vec![],
            ..Self::default()
        }
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            text: "Task Day 1".to_string(),
            completed: false,
        },
        Task {
            id: 2,
            text: "Task Day 2".to_string(),
            completed: true,
        },
        Task {
            id: 3,
            text: "Task Day 3".to_string(),
            completed: false,
        },
    ]
}

/// Hands out ids based on wall-clock milliseconds, bumped past anything
/// already issued or present on the board.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: TaskId,
    clock: fn() -> i64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis())
    }
}

impl IdGenerator {
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { last: 0, clock }
    }

    pub fn next_id(&mut self, existing: &[Task]) -> TaskId {
        let now = TaskId::try_from((self.clock)()).unwrap_or(0);
        let floor = existing
            .iter()
            .map(|task| task.id)
            .max()
            .unwrap_or(0)
            .max(self.last)
            .saturating_add(1);
        let id = now.max(floor);
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardState, IdGenerator, Task};

    #[test]
    fn default_state_has_seed_tasks() {
        let state = BoardState::default();
        assert_eq!(state.tasks.len(), 3);
        assert!(state.show_completed);
        assert!(!state.dark_mode);
        assert_eq!(state.get(2).map(|task| task.completed), Some(true));
    }

    #[test]
    fn ids_stay_distinct_when_clock_stalls() {
        let mut ids = IdGenerator::with_clock(|| 1_000);
        let tasks = vec![Task::new(5, "x".to_string())];

        let first = ids.next_id(&tasks);
        let second = ids.next_id(&tasks);
        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
    }

    #[test]
    fn ids_skip_past_existing_tasks() {
        let mut ids = IdGenerator::with_clock(|| -1);
        let tasks = vec![Task::new(41, "x".to_string())];
        assert_eq!(ids.next_id(&tasks), 42);
    }
}
