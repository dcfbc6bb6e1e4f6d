//! # walletflow
//!
//! Turns a window of wallet-to-wallet transactions into a force-directed graph and the
//! visual parameters a renderer animates it with.
//!
//! ## Pipeline
//!
//! [TransactionSource] fetches the window, [builder] folds it into a deduplicated
//! [GraphData], [PairIndex] precomputes per-pair aggregates and [VisualEncoder] derives
//! particle speed, particle width, colors, sizes and labels. A [Scene] hands the graph and
//! those callbacks to a [RenderAdapter]. [GraphRefresher] repeats the cycle and publishes
//! each result as an immutable [GraphSnapshot]; the newest fetch always wins.

pub mod builder;
pub mod config;
#[cfg(test)]
mod config_test;
pub mod encoder;
pub mod error;
#[cfg(test)]
mod error_test;
pub mod index;
pub mod refresh;
pub mod render;
pub mod source;
pub mod types;

pub use builder::{EdgeMerge, LastWriteWins, MergePolicy, SumAmounts, build, build_with};
pub use config::{GraphConfig, load_config};
pub use encoder::{NodeSizing, SpeedPolicy, TransactionLookup, VisualEncoder};
pub use error::{GraphError, GraphResult};
pub use index::{PairIndex, PairStats};
pub use refresh::{GraphRefresher, RefreshOutcome, RefreshSettings};
pub use render::{JsonSceneAdapter, RenderAdapter, Scene, SceneFrame};
pub use source::{
  FileTransactionSource, HttpTransactionSource, StaticTransactionSource, TransactionSource,
  load_transactions,
};
pub use types::{
  GraphData, GraphSnapshot, NodeRole, THIN_AIR, Transaction, TransactionType, TransferEdge,
  WalletNode,
};
