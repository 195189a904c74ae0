use taskboard_core::KeyValueStore;

/// `window.localStorage`, or nothing at all when the browser refuses access.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
  fn storage()
  -> Option<web_sys::Storage> {
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  }
}

impl KeyValueStore for LocalStorage {
  fn load(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    let Some(storage) = Self::storage()
    else {
      tracing::warn!(
        key,
        "local storage unavailable"
      );
      return Ok(None);
    };

    storage.get_item(key).map_err(
      |error| {
        anyhow::anyhow!(
          "failed reading {key}: \
           {error:?}"
        )
      }
    )
  }

  fn save(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let storage = Self::storage()
      .ok_or_else(|| {
        anyhow::anyhow!(
          "local storage unavailable"
        )
      })?;

    storage
      .set_item(key, value)
      .map_err(|error| {
        anyhow::anyhow!(
          "failed writing {key}: \
           {error:?}"
        )
      })
  }
}
