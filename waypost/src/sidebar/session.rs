//! Sidebar scroll memory.
//!
//! Navigating between chapters replaces the whole document, so the only
//! state carried across a sidebar click is one session-scoped pixel
//! offset: how far from the sidebar top the clicked link sat. On the next
//! page the sidebar scrolls so the active entry lands at the same offset,
//! keeping the list visually still while the content changes.

use std::collections::HashMap;

/// Session key under which the scroll offset travels between pages.
pub const SCROLL_OFFSET_KEY: &str = "sidebar-scroll-offset";

/// Session-scoped key-value storage, as provided by the embedding host.
pub trait SessionStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: String);
  fn remove(&mut self, key: &str);
}

/// In-memory store for tests and embedders without a browser session.
#[derive(Debug, Default)]
pub struct MemoryStore {
  values: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) {
    self.values.insert(key.to_string(), value);
  }

  fn remove(&mut self, key: &str) {
    self.values.remove(key);
  }
}

/// Record the clicked link's offset from the sidebar top.
pub fn remember(store: &mut dyn SessionStore, link_top: f64, sidebar_top: f64) {
  store.set(SCROLL_OFFSET_KEY, (link_top - sidebar_top).to_string());
}

/// Consume the stored offset and compute the scroll adjustment that puts
/// the active entry back at the remembered position.
///
/// Returns the delta to add to the sidebar's scroll top, or `None` when no
/// offset was stored (first visit, or navigation outside the sidebar); the
/// caller should fall back to [`center`]. The stored value is removed
/// either way so a stale offset never outlives one navigation.
pub fn restore(
  store: &mut dyn SessionStore,
  active_offset: f64,
) -> Option<f64> {
  let stored = store.get(SCROLL_OFFSET_KEY);
  store.remove(SCROLL_OFFSET_KEY);

  let stored: f64 = stored?.parse().ok()?;
  Some(active_offset - stored)
}

/// Scroll top that centers the active entry in the sidebar viewport,
/// floored at zero for entries near the top of the list.
#[must_use]
pub fn center(
  active_top: f64,
  active_height: f64,
  sidebar_height: f64,
) -> f64 {
  (active_top - (sidebar_height - active_height) / 2.0).max(0.0)
}
