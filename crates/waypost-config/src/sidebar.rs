use serde::{Deserialize, Serialize};

fn default_container() -> String {
  ".sidebar-scrollbox".to_string()
}

const fn default_true() -> bool {
  true
}

/// Configuration for sidebar behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarOptions {
  /// CSS selector of the element the rendered chapter list is placed
  /// into, one per page.
  #[serde(default = "default_container")]
  pub container: String,

  /// Whether to inject the "on this page" outline after the active
  /// entry. The chapter list itself is always rendered.
  #[serde(default = "default_true")]
  pub inject_outline: bool,
}

impl Default for SidebarOptions {
  fn default() -> Self {
    Self {
      container:      default_container(),
      inject_outline: default_true(),
    }
  }
}
