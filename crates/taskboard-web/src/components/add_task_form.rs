use web_sys::{
  InputEvent,
  KeyboardEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct AddTaskFormProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  let onkeydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };

  let on_submit =
    props.on_submit.clone();

  html! {
      <div class="add-task">
          <input
              type="text"
              placeholder="Add a new task..."
              value={props.value.clone()}
              {oninput}
              {onkeydown}
          />
          <button class="btn" onclick={move |_| on_submit.emit(())}>{ "Add" }</button>
      </div>
  }
}
