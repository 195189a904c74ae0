use taskboard_core::board::Board;
use taskboard_core::drag::DragHandler;
use taskboard_core::file_store::FileStore;
use taskboard_core::storage::{DARK_MODE_KEY, KeyValueStore, SHOW_COMPLETED_KEY, TASKS_KEY};
use taskboard_core::task::BoardState;
use tempfile::tempdir;

#[test]
fn board_state_survives_restart_on_disk() {
    let temp = tempdir().expect("tempdir");

    let expected = {
        let store = FileStore::open(temp.path()).expect("open store");
        let mut board = Board::open(store);
        assert_eq!(board.state(), &BoardState::default());

        let id = board.add_task("  Write release notes  ").expect("task added");
        board.toggle_completed(id);
        board.delete_task(1);
        board.on_drag_start(2);
        board.on_drag_end(2, Some(0));
        board.toggle_show_completed();
        board.toggle_dark_mode();
        board.state().clone()
    };

    let texts: Vec<&str> = expected.tasks.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["Write release notes", "Task Day 2", "Task Day 3"]);

    let reopened = Board::open(FileStore::open(temp.path()).expect("reopen store"));
    assert_eq!(reopened.state(), &expected);

    let store = reopened.into_store();
    assert_eq!(store.load(DARK_MODE_KEY).expect("load"), Some("true".to_string()));
    assert_eq!(
        store.load(SHOW_COMPLETED_KEY).expect("load"),
        Some("false".to_string())
    );
    assert!(store.load(TASKS_KEY).expect("load").is_some());
}

#[test]
fn corrupt_task_list_falls_back_to_seed_tasks() {
    let temp = tempdir().expect("tempdir");
    {
        let mut store = FileStore::open(temp.path()).expect("open store");
        store.save(TASKS_KEY, "not json").expect("save");
        store.save(DARK_MODE_KEY, "true").expect("save");
    }

    let board = Board::open(FileStore::open(temp.path()).expect("reopen store"));
    assert_eq!(board.state().tasks, BoardState::default().tasks);
    assert!(board.state().dark_mode);
}
