//! Tests for `TransactionSet`.

use super::{Transaction, TransactionSet};

#[test]
fn default_is_empty() {
  let set = TransactionSet::default();
  assert!(set.is_empty());
  assert_eq!(set.as_slice().len(), 0);
}

#[test]
fn clone_shares_records() {
  let set = TransactionSet::from(vec![
    Transaction::new("a", "b", 1.0, "TRANSFER"),
    Transaction::new("b", "c", 2.0, "TRANSFER"),
  ]);
  let c = set.clone();
  assert_eq!(c.len(), 2);
  assert!(std::ptr::eq(set.as_slice(), c.as_slice()));
  assert_eq!(c[1].amount, 2.0);
}
