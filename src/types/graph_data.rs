//! Node/edge graph handed to the render adapter.

use serde::Serialize;

use super::{TransferEdge, WalletNode};

/// Deduplicated wallet graph built from one transaction set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
  pub nodes: Vec<WalletNode>,
  pub links: Vec<TransferEdge>,
}

impl GraphData {
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty() && self.links.is_empty()
  }

  pub fn node(&self, id: &str) -> Option<&WalletNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  pub fn link(&self, id: &str) -> Option<&TransferEdge> {
    self.links.iter().find(|l| l.id == id)
  }

  pub fn outgoing_links(&self, node_id: &str) -> Vec<&TransferEdge> {
    self.links.iter().filter(|l| l.source == node_id).collect()
  }

  pub fn incoming_links(&self, node_id: &str) -> Vec<&TransferEdge> {
    self.links.iter().filter(|l| l.target == node_id).collect()
  }
}
