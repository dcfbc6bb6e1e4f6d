//! A wallet in the transaction graph.

use serde::Serialize;

use super::WalletId;

/// A wallet in the transaction graph. Identity is `id`; volumes are informational.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletNode {
  pub id: WalletId,
  pub label: WalletId,
  /// Sum of amounts received in the current transaction set.
  pub in_volume: f64,
  /// Sum of amounts sent in the current transaction set.
  pub out_volume: f64,
}

impl WalletNode {
  pub fn new(id: impl Into<WalletId>) -> Self {
    let id = id.into();
    Self {
      label: id.clone(),
      id,
      in_volume: 0.0,
      out_volume: 0.0,
    }
  }

  pub fn total_volume(&self) -> f64 {
    self.in_volume + self.out_volume
  }

  pub fn net_volume(&self) -> f64 {
    self.in_volume - self.out_volume
  }
}
