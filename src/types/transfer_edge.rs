//! A directed edge between two wallets.

use serde::Serialize;

use super::{Transaction, TransactionType, WalletId};

/// Particle color used for every edge.
pub const PARTICLE_COLOR: &str = "white";

/// A directed edge `source -> target`. One per ordered wallet pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferEdge {
  pub id: String,
  pub source: WalletId,
  pub target: WalletId,
  pub transaction_type: TransactionType,
  /// Amount used to derive particle width; depends on the merge policy.
  pub amount_for_width: f64,
  pub directed_particles: u32,
  pub particle_color: &'static str,
}

/// Edge key for an ordered pair: `"{from}--{to}"`.
pub fn edge_id(from: &str, to: &str) -> String {
  format!("{}--{}", from, to)
}

impl TransferEdge {
  /// Creates the edge for the first transaction seen on `source -> target`.
  pub fn from_transaction(source: &str, target: &str, tx: &Transaction) -> Self {
    Self {
      id: edge_id(source, target),
      source: source.to_string(),
      target: target.to_string(),
      transaction_type: tx.transaction_type.clone(),
      amount_for_width: tx.amount,
      directed_particles: 1,
      particle_color: PARTICLE_COLOR,
    }
  }

  pub fn is_transfer(&self) -> bool {
    self.transaction_type.is_transfer()
  }
}
