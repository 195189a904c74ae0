//! Read-only projections of [`BoardState`] recomputed on every render.

use crate::task::{BoardState, Task};

/// Tasks in display order, with completed ones hidden when the board says so.
pub fn displayed_tasks(state: &BoardState) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|task| state.show_completed || !task.completed)
        .collect()
}

/// Underlying indices of the displayed tasks, in display order.
fn displayed_indices(state: &BoardState) -> Vec<usize> {
    state
        .tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| state.show_completed || !task.completed)
        .map(|(idx, _)| idx)
        .collect()
}

/// Maps a move between displayed positions onto the full task list.
///
/// The result is `(source, destination)` in the index space `reorder_task`
/// expects: `destination` addresses the list after `source` was removed. The
/// dragged task ends up at `destination` in the new displayed list; hidden
/// tasks keep their relative order.
pub fn translate_move(
    state: &BoardState,
    source: usize,
    destination: usize,
) -> Option<(usize, usize)> {
    let visible = displayed_indices(state);
    let from = *visible.get(source)?;

    let remaining: Vec<usize> = visible
        .iter()
        .copied()
        .filter(|idx| *idx != from)
        .map(|idx| if idx > from { idx - 1 } else { idx })
        .collect();

    let to = match remaining.get(destination) {
        Some(idx) => *idx,
        None => remaining.last().map(|idx| idx + 1).unwrap_or(0),
    };

    Some((from, to))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.completed).count(),
        }
    }

    /// Share of completed tasks in `[0, 100]`; zero for an empty board.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.completed as f64 / self.total as f64
    }

    pub fn summary(&self) -> String {
        format!("{} / {} completed", self.completed, self.total)
    }
}

pub fn visibility_label(show_completed: bool) -> &'static str {
    if show_completed {
        "Hide Completed Tasks"
    } else {
        "Show Completed Tasks"
    }
}

#[cfg(test)]
mod tests {
    use super::{Progress, displayed_tasks, translate_move, visibility_label};
    use crate::reducer::{Action, reduce};
    use crate::task::{BoardState, Task};

    fn task(id: u64, text: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            completed,
        }
    }

    fn displayed_texts(state: &BoardState) -> Vec<String> {
        displayed_tasks(state)
            .into_iter()
            .map(|task| task.text.clone())
            .collect()
    }

    #[test]
    fn hidden_completed_tasks_and_half_progress() {
        let state = BoardState {
            tasks: vec![task(1, "A", false), task(2, "B", true)],
            show_completed: false,
            dark_mode: false,
        };

        assert_eq!(displayed_tasks(&state), vec![&task(1, "A", false)]);
        let progress = Progress::of(&state.tasks);
        assert_eq!(progress.percent(), 50.0);
        assert_eq!(progress.summary(), "1 / 2 completed");
    }

    #[test]
    fn empty_board_has_zero_progress() {
        let progress = Progress::of(&[]);
        assert_eq!(progress.percent(), 0.0);
        assert_eq!(progress.summary(), "0 / 0 completed");
    }

    #[test]
    fn progress_stays_in_range() {
        let tasks: Vec<Task> = (0..7).map(|id| task(id, "t", id % 3 == 0)).collect();
        let percent = Progress::of(&tasks).percent();
        assert!((0.0..=100.0).contains(&percent));
        assert!((percent - 100.0 * 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn unfiltered_moves_map_to_themselves() {
        let state = BoardState {
            tasks: vec![task(1, "A", false), task(2, "B", true), task(3, "C", false)],
            ..BoardState::empty()
        };
        assert_eq!(translate_move(&state, 0, 2), Some((0, 2)));
        assert_eq!(translate_move(&state, 2, 0), Some((2, 0)));
        assert_eq!(translate_move(&state, 1, 9), Some((1, 2)));
        assert_eq!(translate_move(&state, 3, 0), None);
    }

    #[test]
    fn filtered_moves_land_where_they_were_dropped() {
        let mut state = BoardState {
            tasks: vec![
                task(1, "A", true),
                task(2, "B", false),
                task(3, "C", true),
                task(4, "D", false),
            ],
            show_completed: false,
            dark_mode: false,
        };
        assert_eq!(displayed_texts(&state), vec!["B", "D"]);

        let (source, destination) = translate_move(&state, 0, 1).expect("visible source");
        reduce(
            &mut state,
            Action::ReorderTask {
                source,
                destination: Some(destination),
            },
        );
        assert_eq!(displayed_texts(&state), vec!["D", "B"]);

        let (source, destination) = translate_move(&state, 1, 0).expect("visible source");
        reduce(
            &mut state,
            Action::ReorderTask {
                source,
                destination: Some(destination),
            },
        );
        assert_eq!(displayed_texts(&state), vec!["B", "D"]);

        state.show_completed = true;
        let mut all = displayed_texts(&state);
        all.sort();
        assert_eq!(all, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn toggle_label_follows_flag() {
        assert_eq!(visibility_label(true), "Hide Completed Tasks");
        assert_eq!(visibility_label(false), "Show Completed Tasks");
    }
}
