//! Runtime configuration: a JSON file whose fields all default, overridden by CLI flags and
//! then by environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::builder::MergePolicy;
use crate::encoder::{NodeSizing, SpeedPolicy};
use crate::error::GraphResult;
use crate::refresh::RefreshSettings;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/analytics/transactions";
/// Overrides [GraphConfig::endpoint].
pub const ENDPOINT_ENV: &str = "TXGRAPH_ENDPOINT";
/// Overrides [GraphConfig::window_seconds].
pub const WINDOW_ENV: &str = "TXGRAPH_WINDOW";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
  pub endpoint: String,
  pub window_seconds: u64,
  pub timeout_ms: u64,
  pub refresh_interval_secs: u64,
  pub speed_policy: SpeedPolicy,
  pub merge_policy: MergePolicy,
  pub node_sizing: NodeSizing,
}

impl Default for GraphConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_string(),
      window_seconds: 60,
      timeout_ms: 10_000,
      refresh_interval_secs: 60,
      speed_policy: SpeedPolicy::default(),
      merge_policy: MergePolicy::default(),
      node_sizing: NodeSizing::default(),
    }
  }
}

impl GraphConfig {
  /// Applies [ENDPOINT_ENV] and [WINDOW_ENV] through `var`. A window that is not a number is
  /// ignored with a warning.
  pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = var(ENDPOINT_ENV) {
      self.endpoint = endpoint;
    }
    if let Some(raw) = var(WINDOW_ENV) {
      match raw.trim().parse::<u64>() {
        Ok(secs) => self.window_seconds = secs,
        Err(e) => warn!(value = %raw, error = %e, "ignoring {}", WINDOW_ENV),
      }
    }
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  /// Refresh period; never shorter than one second.
  pub fn refresh_interval(&self) -> Duration {
    Duration::from_secs(self.refresh_interval_secs.max(1))
  }

  pub fn refresh_settings(&self) -> RefreshSettings {
    RefreshSettings {
      window_seconds: self.window_seconds,
      merge_policy: self.merge_policy,
    }
  }
}

/// Loads a config file. Missing fields take their defaults; a missing file is an error.
#[instrument(level = "trace")]
pub fn load_config(path: &Path) -> GraphResult<GraphConfig> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}
