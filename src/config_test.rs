//! Tests for `GraphConfig` loading and overrides.

use std::collections::HashMap;
use std::time::Duration;

use crate::builder::MergePolicy;
use crate::config::{DEFAULT_ENDPOINT, ENDPOINT_ENV, GraphConfig, WINDOW_ENV, load_config};
use crate::encoder::{NodeSizing, SpeedPolicy};
use crate::error::GraphError;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let map: HashMap<String, String> = pairs
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
  move |k| map.get(k).cloned()
}

#[test]
fn defaults() {
  let c = GraphConfig::default();
  assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
  assert_eq!(c.window_seconds, 60);
  assert_eq!(c.timeout(), Duration::from_secs(10));
  assert_eq!(c.refresh_interval(), Duration::from_secs(60));
  assert_eq!(c.speed_policy, SpeedPolicy::Directed);
  assert_eq!(c.merge_policy, MergePolicy::LastWriteWins);
  assert_eq!(c.node_sizing, NodeSizing::Constant);
}

#[test]
fn partial_file_keeps_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("txgraph.json");
  std::fs::write(
    &path,
    r#"{"window_seconds":300,"speed_policy":"undirected","merge_policy":"sum-amounts","node_sizing":"volume"}"#,
  )
  .unwrap();
  let c = load_config(&path).unwrap();
  assert_eq!(c.window_seconds, 300);
  assert_eq!(c.speed_policy, SpeedPolicy::Undirected);
  assert_eq!(c.merge_policy, MergePolicy::SumAmounts);
  assert_eq!(c.node_sizing, NodeSizing::Volume);
  assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
  assert_eq!(c.timeout_ms, 10_000);
}

#[test]
fn missing_or_invalid_file_is_an_error() {
  let dir = tempfile::tempdir().unwrap();
  assert!(matches!(
    load_config(&dir.path().join("nope.json")),
    Err(GraphError::Io(_))
  ));
  let bad = dir.path().join("bad.json");
  std::fs::write(&bad, r#"{"window_seconds":"soon"}"#).unwrap();
  assert!(matches!(load_config(&bad), Err(GraphError::Json(_))));
}

#[test]
fn env_overrides() {
  let mut c = GraphConfig::default();
  c.apply_env(env(&[(ENDPOINT_ENV, "http://other/tx"), (WINDOW_ENV, " 120 ")]));
  assert_eq!(c.endpoint, "http://other/tx");
  assert_eq!(c.window_seconds, 120);
}

#[test]
fn bad_window_env_is_ignored() {
  let mut c = GraphConfig::default();
  c.apply_env(env(&[(WINDOW_ENV, "a minute")]));
  assert_eq!(c.window_seconds, 60);
  c.apply_env(env(&[]));
  assert_eq!(c, GraphConfig::default());
}

#[test]
fn refresh_settings_and_interval_floor() {
  let c = GraphConfig {
    window_seconds: 15,
    merge_policy: MergePolicy::SumAmounts,
    refresh_interval_secs: 0,
    ..GraphConfig::default()
  };
  let s = c.refresh_settings();
  assert_eq!(s.window_seconds, 15);
  assert_eq!(s.merge_policy, MergePolicy::SumAmounts);
  assert_eq!(c.refresh_interval(), Duration::from_secs(1));
}
