use taskboard_core::view::Progress;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProgressPanelProps {
  pub progress: Progress
}

#[function_component(ProgressPanel)]
pub fn progress_panel(
  props: &ProgressPanelProps
) -> Html {
  let width = format!(
    "width:{}%;",
    props.progress.percent()
  );

  html! {
      <>
          <div class="progress-track">
              <div class="progress-fill" style={width}></div>
          </div>
          <p class="progress-summary">{ props.progress.summary() }</p>
      </>
  }
}
