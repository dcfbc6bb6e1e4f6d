//! Role of a wallet within the current transaction set.

use std::fmt;

use serde::Serialize;

/// Role of a wallet within the current transaction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeRole {
  /// Only ever sends.
  SourceOnly,
  /// Only ever receives (also the vacuous case).
  SinkOnly,
  /// Both sends and receives.
  Both,
}

impl NodeRole {
  pub fn from_flags(is_from: bool, is_to: bool) -> Self {
    match (is_from, is_to) {
      (true, false) => NodeRole::SourceOnly,
      (true, true) => NodeRole::Both,
      _ => NodeRole::SinkOnly,
    }
  }

  /// Fill color used by the renderer.
  pub fn color(self) -> &'static str {
    match self {
      NodeRole::SourceOnly => "red",
      NodeRole::Both => "pink",
      NodeRole::SinkOnly => "orange",
    }
  }
}

impl fmt::Display for NodeRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeRole::SourceOnly => write!(f, "source_only"),
      NodeRole::SinkOnly => write!(f, "sink_only"),
      NodeRole::Both => write!(f, "both"),
    }
  }
}
