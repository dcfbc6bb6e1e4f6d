//! Tests for `GraphError`.

use crate::error::GraphError;

#[test]
fn io_error_converts() {
  let e: GraphError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
  assert!(matches!(e, GraphError::Io(_)));
  assert_eq!(e.to_string(), "I/O error: gone");
}

#[test]
fn json_error_converts() {
  let e: GraphError = serde_json::from_str::<u32>("x").unwrap_err().into();
  assert!(e.to_string().starts_with("invalid JSON"));
}

#[test]
fn invalid_endpoint_message() {
  let e = GraphError::InvalidEndpoint {
    endpoint: "nope".to_string(),
    reason: "relative URL without a base".to_string(),
  };
  assert_eq!(
    e.to_string(),
    "invalid endpoint nope: relative URL without a base"
  );
}
