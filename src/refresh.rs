//! Fetch, build and publish graph snapshots, newest fetch wins.
//!
//! Each [GraphRefresher::refresh] takes a generation number before fetching. When the fetch
//! returns, the snapshot is published only if no later refresh has started in the meantime;
//! otherwise it is dropped so stale data never replaces fresher data. Readers hold an
//! `Arc<GraphSnapshot>` from a `watch` channel and always see one whole snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::builder::MergePolicy;
use crate::source::TransactionSource;
use crate::types::GraphSnapshot;

/// What each refresh fetches and how it builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshSettings {
  pub window_seconds: u64,
  pub merge_policy: MergePolicy,
}

impl Default for RefreshSettings {
  fn default() -> Self {
    Self {
      window_seconds: 60,
      merge_policy: MergePolicy::default(),
    }
  }
}

/// Result of one [GraphRefresher::refresh].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
  Applied {
    generation: u64,
    nodes: usize,
    links: usize,
  },
  /// A newer refresh started before this one finished; its result was discarded.
  Stale { generation: u64, latest: u64 },
}

pub struct GraphRefresher<S> {
  source: S,
  settings: RefreshSettings,
  started: AtomicU64,
  published: watch::Sender<Arc<GraphSnapshot>>,
}

impl<S: TransactionSource> GraphRefresher<S> {
  pub fn new(source: S, settings: RefreshSettings) -> Self {
    let (published, _) = watch::channel(Arc::new(GraphSnapshot::empty()));
    Self {
      source,
      settings,
      started: AtomicU64::new(0),
      published,
    }
  }

  pub fn settings(&self) -> RefreshSettings {
    self.settings
  }

  /// Current snapshot.
  pub fn snapshot(&self) -> Arc<GraphSnapshot> {
    self.published.borrow().clone()
  }

  /// Receiver notified whenever a new snapshot is published.
  pub fn subscribe(&self) -> watch::Receiver<Arc<GraphSnapshot>> {
    self.published.subscribe()
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn refresh(&self) -> RefreshOutcome {
    let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
    let transactions = self.source.fetch(self.settings.window_seconds).await;

    let latest = self.started.load(Ordering::SeqCst);
    if latest != generation {
      debug!(generation, latest, "discarding stale fetch");
      return RefreshOutcome::Stale { generation, latest };
    }

    let snapshot = GraphSnapshot::build(
      generation,
      self.settings.window_seconds,
      transactions,
      &self.settings.merge_policy,
    );
    let (nodes, links) = (snapshot.graph.nodes.len(), snapshot.graph.links.len());

    // Re-check inside the channel lock: a refresh may have started while we were building.
    let mut applied = false;
    self.published.send_if_modified(|current| {
      if self.started.load(Ordering::SeqCst) == generation && current.generation < generation {
        *current = Arc::new(snapshot);
        applied = true;
      }
      applied
    });

    if applied {
      info!(generation, nodes, links, "published graph snapshot");
      RefreshOutcome::Applied {
        generation,
        nodes,
        links,
      }
    } else {
      let latest = self.started.load(Ordering::SeqCst);
      debug!(generation, latest, "discarding stale build");
      RefreshOutcome::Stale { generation, latest }
    }
  }

  /// Refreshes every `every` until `shutdown` becomes true or its sender is dropped.
  pub async fn run(&self, every: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(every);
    info!(every_ms = every.as_millis() as u64, "refresh loop started");
    loop {
      if *shutdown.borrow_and_update() {
        break;
      }
      tokio::select! {
        _ = ticker.tick() => {
          self.refresh().await;
        }
        changed = shutdown.changed() => {
          if changed.is_err() {
            break;
          }
        }
      }
    }
    info!("refresh loop stopped");
  }
}
