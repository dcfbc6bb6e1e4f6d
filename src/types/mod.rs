//! Data model: raw transactions and the wallet graph derived from them.

mod graph_data;
mod graph_snapshot;
mod node_role;
mod transaction;
mod transaction_set;
#[cfg(test)]
mod transaction_set_test;
#[cfg(test)]
mod transaction_test;
mod transfer_edge;
mod wallet_node;

pub use graph_data::GraphData;
pub use graph_snapshot::GraphSnapshot;
pub use node_role::NodeRole;
pub use transaction::{
  THIN_AIR, Transaction, TransactionType, UNKNOWN_TYPE, WalletId, parse_amount,
};
pub use transaction_set::TransactionSet;
pub use transfer_edge::{PARTICLE_COLOR, TransferEdge, edge_id};
pub use wallet_node::WalletNode;
