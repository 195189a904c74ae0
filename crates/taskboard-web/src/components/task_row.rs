use taskboard_core::{
  Task,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub index:         usize,
  pub task:          Task,
  pub dragging:      bool,
  pub drop_hint:     bool,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_drag_start: Callback<usize>,
  pub on_drag_over:  Callback<usize>,
  pub on_drop:       Callback<usize>,
  pub on_drag_end:   Callback<()>
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let index = props.index;
  let task_id = props.task.id;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data(
              "text/plain",
              &task_id.to_string()
            );
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(index);
      }
    )
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drag_over.emit(index);
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drop.emit(index);
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();

  html! {
      <li
          class={classes!(
              "task-row",
              props.dragging.then_some("dragging"),
              props.drop_hint.then_some("drop-hint")
          )}
          draggable="true"
          {ondragstart}
          {ondragover}
          {ondrop}
          {ondragend}
      >
          <input
              type="checkbox"
              checked={props.task.completed}
              onchange={move |_| on_toggle.emit(task_id)}
          />
          <span class={classes!("task-text", props.task.completed.then_some("done"))}>
              { &props.task.text }
          </span>
          <button
              class="delete"
              title="Delete task"
              onclick={move |e: MouseEvent| {
                  e.stop_propagation();
                  on_delete.emit(task_id);
              }}
          >
              { "×" }
          </button>
      </li>
  }
}
