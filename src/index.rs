//! Per-snapshot aggregates so encoder lookups are O(1) instead of a scan per frame.
//!
//! Built once when a snapshot is created and dropped with it; never updated in place.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::encoder::TransactionLookup;
use crate::types::{Transaction, WalletId};

/// Aggregates for one ordered wallet pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairStats {
  pub count: usize,
  /// Amount of the most recent transaction on the pair.
  pub last_amount: f64,
}

/// `(from, to)` aggregates plus which wallets send and receive.
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
  pairs: HashMap<WalletId, HashMap<WalletId, PairStats>>,
  senders: HashSet<WalletId>,
  receivers: HashSet<WalletId>,
}

impl PairIndex {
  #[instrument(level = "trace", skip_all, fields(transactions = transactions.len()))]
  pub fn from_transactions(transactions: &[Transaction]) -> Self {
    let mut index = PairIndex::default();
    for tx in transactions {
      let from = tx.source_wallet();
      if !index.senders.contains(from) {
        index.senders.insert(from.to_string());
      }
      let Some(to) = tx.target_wallet() else {
        continue;
      };
      if !index.receivers.contains(to) {
        index.receivers.insert(to.to_string());
      }
      let stats = index
        .pairs
        .entry(from.to_string())
        .or_default()
        .entry(to.to_string())
        .or_default();
      stats.count += 1;
      stats.last_amount = tx.amount;
    }
    index
  }

  pub fn stats(&self, source: &str, target: &str) -> Option<&PairStats> {
    self.pairs.get(source)?.get(target)
  }

  /// Number of distinct ordered pairs.
  pub fn pair_len(&self) -> usize {
    self.pairs.values().map(HashMap::len).sum()
  }
}

impl TransactionLookup for PairIndex {
  fn pair_count(&self, source: &str, target: &str) -> usize {
    self.stats(source, target).map_or(0, |s| s.count)
  }

  fn last_amount(&self, source: &str, target: &str) -> Option<f64> {
    self.stats(source, target).map(|s| s.last_amount)
  }

  fn sends(&self, wallet: &str) -> bool {
    self.senders.contains(wallet)
  }

  fn receives(&self, wallet: &str) -> bool {
    self.receivers.contains(wallet)
  }
}
