//! Graph builder: one pass over a transaction sequence into deduplicated nodes and edges.
//!
//! Nodes are keyed by wallet id and edges by `"{from}--{to}"`; both keep first-appearance
//! order. Repeated edges are folded with an [EdgeMerge] policy, [LastWriteWins] by default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::types::{GraphData, Transaction, TransferEdge, WalletId, WalletNode, edge_id};

/// How a later transaction on an existing `from -> to` edge updates that edge.
pub trait EdgeMerge: Send + Sync {
  fn merge(&self, edge: &mut TransferEdge, tx: &Transaction);
}

/// Later transaction replaces type and width amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteWins;

impl EdgeMerge for LastWriteWins {
  fn merge(&self, edge: &mut TransferEdge, tx: &Transaction) {
    edge.transaction_type = tx.transaction_type.clone();
    edge.amount_for_width = tx.amount;
  }
}

/// Later transaction replaces type; amounts accumulate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumAmounts;

impl EdgeMerge for SumAmounts {
  fn merge(&self, edge: &mut TransferEdge, tx: &Transaction) {
    edge.transaction_type = tx.transaction_type.clone();
    edge.amount_for_width += tx.amount;
  }
}

/// Configurable choice of [EdgeMerge].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
  #[default]
  LastWriteWins,
  SumAmounts,
}

impl EdgeMerge for MergePolicy {
  fn merge(&self, edge: &mut TransferEdge, tx: &Transaction) {
    match self {
      MergePolicy::LastWriteWins => LastWriteWins.merge(edge, tx),
      MergePolicy::SumAmounts => SumAmounts.merge(edge, tx),
    }
  }
}

/// Builds the graph with [LastWriteWins].
pub fn build(transactions: &[Transaction]) -> GraphData {
  build_with(transactions, &LastWriteWins)
}

/// Builds the graph, folding repeated edges with `merge`.
///
/// Never fails: a missing `from` becomes [crate::types::THIN_AIR], a missing `to` yields the
/// sender's node without an edge, and amounts are not validated.
#[instrument(level = "trace", skip_all, fields(transactions = transactions.len()))]
pub fn build_with(transactions: &[Transaction], merge: &dyn EdgeMerge) -> GraphData {
  let mut nodes: Vec<WalletNode> = Vec::new();
  let mut node_slots: HashMap<WalletId, usize> = HashMap::new();
  let mut links: Vec<TransferEdge> = Vec::new();
  let mut link_slots: HashMap<String, usize> = HashMap::new();

  for tx in transactions {
    let from = tx.source_wallet();
    let from_slot = node_slot(&mut nodes, &mut node_slots, from);
    nodes[from_slot].out_volume += tx.amount;

    let Some(to) = tx.target_wallet() else {
      trace!(from, "transaction without receiver, no edge");
      continue;
    };
    let to_slot = node_slot(&mut nodes, &mut node_slots, to);
    nodes[to_slot].in_volume += tx.amount;

    let id = edge_id(from, to);
    match link_slots.get(&id) {
      Some(&slot) => merge.merge(&mut links[slot], tx),
      None => {
        link_slots.insert(id, links.len());
        links.push(TransferEdge::from_transaction(from, to, tx));
      }
    }
  }

  trace!(nodes = nodes.len(), links = links.len(), "graph built");
  GraphData { nodes, links }
}

/// Index of the node for `id`, inserting it on first sight.
fn node_slot(
  nodes: &mut Vec<WalletNode>,
  slots: &mut HashMap<WalletId, usize>,
  id: &str,
) -> usize {
  if let Some(&slot) = slots.get(id) {
    return slot;
  }
  let slot = nodes.len();
  nodes.push(WalletNode::new(id));
  slots.insert(id.to_string(), slot);
  slot
}
