use std::io::Write;

use anyhow::{anyhow, bail};
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::cli::Command;
use crate::drag::DragHandler;
use crate::render::Renderer;
use crate::storage::{KeyValueStore, encode_tasks};
use crate::view;

#[instrument(skip(board, renderer, out))]
pub fn dispatch<S, W>(
    board: &mut Board<S>,
    renderer: &Renderer,
    command: Command,
    mut out: W,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    debug!(?command, "dispatching command");

    match command {
        Command::List => renderer.write_board(&mut out, board.state()),
        Command::Add { text } => cmd_add(board, &text.join(" "), out),
        Command::Toggle { id } => cmd_toggle(board, id, out),
        Command::Delete { id } => cmd_delete(board, id, out),
        Command::Move { from, to } => cmd_move(board, renderer, from, to, out),
        Command::Completed => {
            let shown = board.toggle_show_completed();
            let verb = if shown { "shown" } else { "hidden" };
            writeln!(out, "Completed tasks are now {verb}.")?;
            Ok(())
        }
        Command::Theme => {
            let dark = board.toggle_dark_mode();
            writeln!(out, "Theme: {}.", if dark { "dark" } else { "light" })?;
            Ok(())
        }
        Command::Progress => {
            renderer.write_progress(&mut out, &board.progress(), board.state().dark_mode)
        }
        Command::Export => {
            writeln!(out, "{}", encode_tasks(&board.state().tasks)?)?;
            Ok(())
        }
    }
}

fn cmd_add<S: KeyValueStore, W: Write>(
    board: &mut Board<S>,
    text: &str,
    mut out: W,
) -> anyhow::Result<()> {
    board.set_input(text);
    let Some(id) = board.submit_input() else {
        bail!("nothing to add: task text is blank");
    };
    info!(id, "added task");
    writeln!(out, "Added task {id}.")?;
    Ok(())
}

fn cmd_toggle<S: KeyValueStore, W: Write>(
    board: &mut Board<S>,
    id: u64,
    mut out: W,
) -> anyhow::Result<()> {
    if !board.toggle_completed(id) {
        return Err(anyhow!("no task with id {id}"));
    }
    let completed = board.state().get(id).is_some_and(|task| task.completed);
    let status = if completed { "completed" } else { "pending" };
    writeln!(out, "Task {id} is now {status}.")?;
    Ok(())
}

fn cmd_delete<S: KeyValueStore, W: Write>(
    board: &mut Board<S>,
    id: u64,
    mut out: W,
) -> anyhow::Result<()> {
    if !board.delete_task(id) {
        return Err(anyhow!("no task with id {id}"));
    }
    writeln!(out, "Deleted task {id}.")?;
    Ok(())
}

/// Positions are 1-based, as printed by `list`.
fn cmd_move<S: KeyValueStore, W: Write>(
    board: &mut Board<S>,
    renderer: &Renderer,
    from: usize,
    to: usize,
    mut out: W,
) -> anyhow::Result<()> {
    let shown = view::displayed_tasks(board.state()).len();
    if from == 0 || from > shown {
        bail!("no task at position {from} ({shown} shown)");
    }
    if to == 0 {
        bail!("positions start at 1");
    }

    board.on_drag_start(from - 1);
    board.on_drag_end(from - 1, Some(to - 1));
    renderer.write_board(&mut out, board.state())
}

#[cfg(test)]
mod tests {
    use super::dispatch;
    use crate::board::Board;
    use crate::cli::Command;
    use crate::render::Renderer;
    use crate::storage::{MemoryStore, TASKS_KEY};
    use crate::task::BoardState;

    fn run(board: &mut Board<MemoryStore>, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        dispatch(board, &Renderer::plain(10), command, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    fn seeded() -> Board<MemoryStore> {
        Board::with_state(MemoryStore::new(), BoardState::default())
    }

    #[test]
    fn add_joins_words_and_persists() {
        let mut board = seeded();
        let text = run(
            &mut board,
            Command::Add {
                text: vec!["Buy".to_string(), "milk".to_string()],
            },
        )
        .unwrap();

        assert!(text.starts_with("Added task "));
        assert_eq!(
            board.state().tasks.last().map(|task| task.text.as_str()),
            Some("Buy milk")
        );
        assert!(board.store().get(TASKS_KEY).is_some());
    }

    #[test]
    fn blank_add_and_unknown_ids_are_errors() {
        let mut board = seeded();
        assert!(
            run(
                &mut board,
                Command::Add {
                    text: vec!["  ".to_string()]
                }
            )
            .is_err()
        );
        assert!(run(&mut board, Command::Toggle { id: 99 }).is_err());
        assert!(run(&mut board, Command::Delete { id: 99 }).is_err());
        assert_eq!(board.state(), &BoardState::default());
    }

    #[test]
    fn move_uses_listed_positions() {
        let mut board = seeded();
        run(&mut board, Command::Completed).unwrap();

        let text = run(&mut board, Command::Move { from: 2, to: 1 }).unwrap();
        let order: Vec<u64> = board.state().tasks.iter().map(|task| task.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert!(text.contains("Task Day 3"));

        assert!(run(&mut board, Command::Move { from: 3, to: 1 }).is_err());
        assert!(run(&mut board, Command::Move { from: 1, to: 0 }).is_err());
    }

    #[test]
    fn toggles_report_new_state() {
        let mut board = seeded();
        assert_eq!(
            run(&mut board, Command::Toggle { id: 1 }).unwrap(),
            "Task 1 is now completed.\n"
        );
        assert_eq!(
            run(&mut board, Command::Theme).unwrap(),
            "Theme: dark.\n"
        );
        assert_eq!(
            run(&mut board, Command::Completed).unwrap(),
            "Completed tasks are now hidden.\n"
        );
        assert_eq!(
            run(&mut board, Command::Progress).unwrap(),
            "[#######---]  67%  2 / 3 completed\n"
        );
    }

    #[test]
    fn export_prints_stored_shape() {
        let mut board = Board::with_state(MemoryStore::new(), BoardState::empty());
        board.add_task("A");
        let text = run(&mut board, Command::Export).unwrap();
        assert!(text.contains(r#""text":"A","completed":false"#), "{text}");
    }
}
