//! Immutable snapshot of the transactions from one fetch.

use std::ops::Deref;
use std::sync::Arc;

use super::Transaction;

/// Immutable snapshot of the transactions from one fetch, shared cheaply between readers.
///
/// Kept alongside the derived graph because classification and speed work on raw
/// multiplicities, which the deduplicated graph does not carry.
#[derive(Debug, Clone)]
pub struct TransactionSet(Arc<[Transaction]>);

impl TransactionSet {
  pub fn as_slice(&self) -> &[Transaction] {
    &self.0
  }
}

impl Default for TransactionSet {
  fn default() -> Self {
    Self(Arc::from(Vec::new()))
  }
}

impl From<Vec<Transaction>> for TransactionSet {
  fn from(v: Vec<Transaction>) -> Self {
    Self(Arc::from(v))
  }
}

impl Deref for TransactionSet {
  type Target = [Transaction];

  fn deref(&self) -> &[Transaction] {
    &self.0
  }
}
