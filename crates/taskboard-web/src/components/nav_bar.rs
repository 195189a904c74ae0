use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
  pub dark_mode:       bool,
  pub on_toggle_theme: Callback<()>
}

#[function_component(NavBar)]
pub fn nav_bar(
  props: &NavBarProps
) -> Html {
  let on_toggle_theme =
    props.on_toggle_theme.clone();
  let (icon, title) = if props.dark_mode
  {
    ("☀", "Switch to light mode")
  } else {
    ("☾", "Switch to dark mode")
  };

  html! {
      <nav class="navbar">
          <span class="brand">{ "My To-Do App" }</span>
          <button
              class="theme-toggle"
              title={title}
              onclick={move |_| on_toggle_theme.emit(())}
          >
              { icon }
          </button>
      </nav>
  }
}
