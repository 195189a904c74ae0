use std::cell::RefCell;
use std::rc::Rc;

use taskboard_core::view::{
  Progress,
  displayed_tasks,
  visibility_label
};
use taskboard_core::{
  Board,
  BoardState,
  DragHandler,
  TaskId
};
use yew::{
  Callback,
  Html,
  UseStateHandle,
  classes,
  function_component,
  html,
  use_mut_ref,
  use_state
};

use crate::components::{
  AddTaskForm,
  NavBar,
  ProgressPanel,
  TaskRow
};
use crate::storage::LocalStorage;

type SharedBoard =
  Rc<RefCell<Board<LocalStorage>>>;

/// What the view renders from; refreshed after every board operation.
#[derive(Clone, PartialEq)]
struct Snapshot {
  state:       BoardState,
  input:       String,
  drag_origin: Option<usize>
}

impl Snapshot {
  fn capture(
    board: &Board<LocalStorage>
  ) -> Self {
    Self {
      state:       board.state().clone(),
      input:       board
        .input()
        .to_string(),
      drag_origin: board.drag_origin()
    }
  }
}

fn board_callback<E: 'static>(
  board: &SharedBoard,
  snapshot: &UseStateHandle<Snapshot>,
  apply: impl Fn(
    &mut Board<LocalStorage>,
    E
  ) + 'static
) -> Callback<E> {
  let board = board.clone();
  let snapshot = snapshot.clone();
  Callback::from(move |event: E| {
    let next = {
      let mut board =
        board.borrow_mut();
      apply(&mut board, event);
      Snapshot::capture(&board)
    };
    snapshot.set(next);
  })
}

#[function_component(TaskBoard)]
pub fn task_board() -> Html {
  let board = use_mut_ref(|| {
    Board::open(LocalStorage)
  });
  let snapshot = use_state(|| {
    Snapshot::capture(&board.borrow())
  });
  let drop_hint =
    use_state(|| None::<usize>);

  let on_input = board_callback(
    &board,
    &snapshot,
    |board, value: String| {
      board.set_input(value)
    }
  );
  let on_submit = board_callback(
    &board,
    &snapshot,
    |board, (): ()| {
      if let Some(id) =
        board.submit_input()
      {
        tracing::info!(id, "task added");
      }
    }
  );
  let on_toggle = board_callback(
    &board,
    &snapshot,
    |board, id: TaskId| {
      board.toggle_completed(id);
    }
  );
  let on_delete = board_callback(
    &board,
    &snapshot,
    |board, id: TaskId| {
      board.delete_task(id);
    }
  );
  let on_toggle_visibility =
    board_callback(
      &board,
      &snapshot,
      |board, (): ()| {
        board.toggle_show_completed();
      }
    );
  let on_toggle_theme = board_callback(
    &board,
    &snapshot,
    |board, (): ()| {
      board.toggle_dark_mode();
    }
  );
  let on_drag_start = board_callback(
    &board,
    &snapshot,
    |board, index: usize| {
      tracing::debug!(
        index,
        "row drag start"
      );
      board.on_drag_start(index);
    }
  );

  let on_drag_over = {
    let drop_hint = drop_hint.clone();
    Callback::from(
      move |index: usize| {
        if *drop_hint != Some(index) {
          drop_hint.set(Some(index));
        }
      }
    )
  };

  let on_drop = {
    let drop_hint = drop_hint.clone();
    let commit = board_callback(
      &board,
      &snapshot,
      |board, index: usize| {
        if let Some(origin) =
          board.drag_origin()
        {
          board.on_drag_end(
            origin,
            Some(index)
          );
        }
      }
    );
    Callback::from(
      move |index: usize| {
        drop_hint.set(None);
        commit.emit(index);
      }
    )
  };

  // dragend also fires after a successful drop; by then the drag is idle.
  let on_drag_end = {
    let drop_hint = drop_hint.clone();
    let cancel = board_callback(
      &board,
      &snapshot,
      |board, (): ()| {
        board.cancel_drag();
      }
    );
    Callback::from(move |(): ()| {
      drop_hint.set(None);
      cancel.emit(());
    })
  };

  let state = &snapshot.state;
  let progress =
    Progress::of(&state.tasks);
  let theme_class = if state.dark_mode {
    "theme-dark"
  } else {
    "theme-light"
  };
  let visibility_click =
    Callback::from(
      move |_: yew::MouseEvent| {
        on_toggle_visibility.emit(())
      }
    );

  html! {
      <div class={classes!("app", theme_class)}>
          <NavBar dark_mode={state.dark_mode} on_toggle_theme={on_toggle_theme} />
          <main class="board">
              <ProgressPanel progress={progress} />
              <AddTaskForm
                  value={snapshot.input.clone()}
                  on_input={on_input}
                  on_submit={on_submit}
              />
              <button class="btn visibility-toggle" onclick={visibility_click}>
                  { visibility_label(state.show_completed) }
              </button>
              <ul class="task-list">
                  {
                      for displayed_tasks(state).into_iter().enumerate().map(|(index, task)| html! {
                          <TaskRow
                              key={task.id.to_string()}
                              index={index}
                              task={task.clone()}
                              dragging={snapshot.drag_origin == Some(index)}
                              drop_hint={*drop_hint == Some(index)}
                              on_toggle={on_toggle.clone()}
                              on_delete={on_delete.clone()}
                              on_drag_start={on_drag_start.clone()}
                              on_drag_over={on_drag_over.clone()}
                              on_drop={on_drop.clone()}
                              on_drag_end={on_drag_end.clone()}
                          />
                      })
                  }
              </ul>
          </main>
      </div>
  }
}
