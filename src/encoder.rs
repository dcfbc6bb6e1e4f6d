//! Visual encoder: maps wallets and transfers to particle speed, particle width, colors,
//! sizes and label text.
//!
//! Every function here is pure and is called by the renderer once per frame per element,
//! so lookups go through [TransactionLookup]: a linear scan over the raw transactions, or
//! the precomputed [crate::index::PairIndex] for the same snapshot. Missing data degrades to
//! defaults (zero amount, base speed) instead of erroring.

use serde::{Deserialize, Serialize};

use crate::types::{NodeRole, Transaction, TransactionSet, TransferEdge, WalletNode};

/// Particle speed for an edge backed by a single transaction.
pub const BASE_PARTICLE_SPEED: f64 = 0.005;
/// Speed added per additional transaction on the same edge. Uncapped.
pub const SPEED_INCREMENT: f64 = 0.001;
/// Amount at which particle width reaches [MAX_PARTICLE_WIDTH].
pub const REFERENCE_VOLUME: f64 = 1000.0;
pub const MIN_PARTICLE_WIDTH: f64 = 0.1;
pub const MAX_PARTICLE_WIDTH: f64 = 1.0;
pub const BASE_NODE_SIZE: f64 = 1.0;
pub const ARROW_LENGTH: f64 = 3.0;
pub const LINK_COLOR: &str = "white";

/// Aggregates over one transaction set that the encoder needs.
///
/// `source` is compared against [Transaction::source_wallet], so the sentinel wallet
/// matches records with no `from`.
pub trait TransactionLookup {
  /// Number of transactions going exactly `source -> target`.
  fn pair_count(&self, source: &str, target: &str) -> usize;
  /// Amount of the most recent transaction `source -> target`.
  fn last_amount(&self, source: &str, target: &str) -> Option<f64>;
  /// True if `wallet` sends in any transaction.
  fn sends(&self, wallet: &str) -> bool;
  /// True if `wallet` receives in any transaction.
  fn receives(&self, wallet: &str) -> bool;
}

impl TransactionLookup for [Transaction] {
  fn pair_count(&self, source: &str, target: &str) -> usize {
    self.iter().filter(|t| t.connects(source, target)).count()
  }

  fn last_amount(&self, source: &str, target: &str) -> Option<f64> {
    self
      .iter()
      .rev()
      .find(|t| t.connects(source, target))
      .map(|t| t.amount)
  }

  fn sends(&self, wallet: &str) -> bool {
    self.iter().any(|t| t.source_wallet() == wallet)
  }

  fn receives(&self, wallet: &str) -> bool {
    self.iter().any(|t| t.target_wallet() == Some(wallet))
  }
}

impl TransactionLookup for TransactionSet {
  fn pair_count(&self, source: &str, target: &str) -> usize {
    self.as_slice().pair_count(source, target)
  }

  fn last_amount(&self, source: &str, target: &str) -> Option<f64> {
    self.as_slice().last_amount(source, target)
  }

  fn sends(&self, wallet: &str) -> bool {
    self.as_slice().sends(wallet)
  }

  fn receives(&self, wallet: &str) -> bool {
    self.as_slice().receives(wallet)
  }
}

/// Which transactions count towards an edge's particle speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedPolicy {
  /// Only `source -> target`.
  #[default]
  Directed,
  /// `source -> target` plus `target -> source`.
  Undirected,
}

impl SpeedPolicy {
  pub fn count<L: TransactionLookup + ?Sized>(self, lookup: &L, source: &str, target: &str) -> usize {
    match self {
      SpeedPolicy::Directed => lookup.pair_count(source, target),
      SpeedPolicy::Undirected if source == target => lookup.pair_count(source, target),
      SpeedPolicy::Undirected => {
        lookup.pair_count(source, target) + lookup.pair_count(target, source)
      }
    }
  }
}

/// How node size is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeSizing {
  /// Every node gets [BASE_NODE_SIZE].
  #[default]
  Constant,
  /// Twice the wallet's total volume.
  Volume,
}

/// Speed for an edge carrying `count` transactions.
pub fn speed_for_count(count: usize) -> f64 {
  if count <= 1 {
    BASE_PARTICLE_SPEED
  } else {
    BASE_PARTICLE_SPEED + (count - 1) as f64 * SPEED_INCREMENT
  }
}

pub fn particle_speed<L: TransactionLookup + ?Sized>(
  lookup: &L,
  source: &str,
  target: &str,
  policy: SpeedPolicy,
) -> f64 {
  speed_for_count(policy.count(lookup, source, target))
}

/// Linear from 0.1 to 1.0 up to [REFERENCE_VOLUME], logarithmic (unclamped) above it.
///
/// The log branch restarts near 0.1, so width falls sharply just past the reference and
/// only gets back to 1.0 at ten times it.
pub fn particle_width(amount: f64) -> f64 {
  let ratio = if amount <= REFERENCE_VOLUME {
    amount / REFERENCE_VOLUME
  } else {
    (amount / REFERENCE_VOLUME).log10()
  };
  MIN_PARTICLE_WIDTH + ratio * (MAX_PARTICLE_WIDTH - MIN_PARTICLE_WIDTH)
}

/// Width from the most recent `from -> to` transaction, or from a zero amount if none.
pub fn width_for_pair<L: TransactionLookup + ?Sized>(lookup: &L, from: &str, to: &str) -> f64 {
  particle_width(lookup.last_amount(from, to).unwrap_or(0.0))
}

/// Role of `node`, judged on its label.
pub fn classify<L: TransactionLookup + ?Sized>(lookup: &L, node: &WalletNode) -> NodeRole {
  NodeRole::from_flags(lookup.sends(&node.label), lookup.receives(&node.label))
}

/// Display form of a wallet id: first 4 + `...` + last 4 characters.
///
/// Ids shorter than four characters repeat in full on both sides.
pub fn short_wallet(id: &str) -> String {
  let chars: Vec<char> = id.chars().collect();
  let head: String = chars.iter().take(4).collect();
  let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
  format!("{}...{}", head, tail)
}

pub fn node_size(node: &WalletNode, sizing: NodeSizing) -> f64 {
  match sizing {
    NodeSizing::Constant => BASE_NODE_SIZE,
    NodeSizing::Volume => node.total_volume() * 2.0,
  }
}

pub fn arrow_color(edge: &TransferEdge) -> &'static str {
  if edge.is_transfer() { "white" } else { "gray" }
}

pub fn node_label(node: &WalletNode) -> String {
  format!("Wallet Address: {}", short_wallet(&node.label))
}

pub fn link_label(edge: &TransferEdge, speed: f64, width: f64) -> String {
  format!(
    "Transaction Type: {}\nParticle Speed: {:.3}\nParticle Width: {:.3}",
    edge.transaction_type, speed, width
  )
}

/// Encoder bound to one snapshot's lookup and the configured policies.
#[derive(Debug)]
pub struct VisualEncoder<'a, L: ?Sized> {
  lookup: &'a L,
  pub speed_policy: SpeedPolicy,
  pub node_sizing: NodeSizing,
}

impl<L: ?Sized> Clone for VisualEncoder<'_, L> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<L: ?Sized> Copy for VisualEncoder<'_, L> {}

impl<'a, L: TransactionLookup + ?Sized> VisualEncoder<'a, L> {
  pub fn new(lookup: &'a L) -> Self {
    Self {
      lookup,
      speed_policy: SpeedPolicy::default(),
      node_sizing: NodeSizing::default(),
    }
  }

  pub fn with_speed_policy(mut self, policy: SpeedPolicy) -> Self {
    self.speed_policy = policy;
    self
  }

  pub fn with_node_sizing(mut self, sizing: NodeSizing) -> Self {
    self.node_sizing = sizing;
    self
  }

  pub fn lookup(&self) -> &'a L {
    self.lookup
  }

  pub fn particle_speed(&self, edge: &TransferEdge) -> f64 {
    particle_speed(self.lookup, &edge.source, &edge.target, self.speed_policy)
  }

  /// Width from the edge's own amount, so it follows the builder's merge policy.
  pub fn particle_width(&self, edge: &TransferEdge) -> f64 {
    particle_width(edge.amount_for_width)
  }

  pub fn node_role(&self, node: &WalletNode) -> NodeRole {
    classify(self.lookup, node)
  }

  pub fn node_color(&self, node: &WalletNode) -> &'static str {
    self.node_role(node).color()
  }

  pub fn node_size(&self, node: &WalletNode) -> f64 {
    node_size(node, self.node_sizing)
  }

  pub fn node_label(&self, node: &WalletNode) -> String {
    node_label(node)
  }

  pub fn link_label(&self, edge: &TransferEdge) -> String {
    link_label(edge, self.particle_speed(edge), self.particle_width(edge))
  }

  pub fn particle_color(&self, edge: &TransferEdge) -> &'static str {
    edge.particle_color
  }

  pub fn arrow_color(&self, edge: &TransferEdge) -> &'static str {
    arrow_color(edge)
  }
}
