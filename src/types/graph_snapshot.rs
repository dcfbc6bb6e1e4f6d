//! Everything derived from one fetch: raw transactions, lookup index and graph.

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::{GraphData, Transaction, TransactionSet};
use crate::builder::{self, EdgeMerge};
use crate::index::PairIndex;

/// Everything derived from one fetch. Never mutated after construction; replaced wholesale.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
  /// Refresh generation that produced this snapshot (0 for the initial empty one).
  pub generation: u64,
  pub fetched_at: DateTime<Utc>,
  pub window_seconds: u64,
  pub transactions: TransactionSet,
  pub index: PairIndex,
  pub graph: GraphData,
}

impl GraphSnapshot {
  pub fn empty() -> Self {
    Self {
      generation: 0,
      fetched_at: Utc::now(),
      window_seconds: 0,
      transactions: TransactionSet::default(),
      index: PairIndex::default(),
      graph: GraphData::default(),
    }
  }

  /// Builds graph and index from `transactions`.
  #[instrument(level = "trace", skip(transactions, merge), fields(transactions = transactions.len()))]
  pub fn build(
    generation: u64,
    window_seconds: u64,
    transactions: Vec<Transaction>,
    merge: &dyn EdgeMerge,
  ) -> Self {
    let graph = builder::build_with(&transactions, merge);
    let index = PairIndex::from_transactions(&transactions);
    Self {
      generation,
      fetched_at: Utc::now(),
      window_seconds,
      transactions: TransactionSet::from(transactions),
      index,
      graph,
    }
  }
}
