//! Library end-to-end: source -> refresher -> scene -> JSON adapter.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use walletflow::{
  FileTransactionSource, GraphRefresher, JsonSceneAdapter, MergePolicy, NodeRole, NodeSizing,
  RefreshOutcome, RefreshSettings, RenderAdapter, Scene, SpeedPolicy, StaticTransactionSource,
  THIN_AIR, Transaction, TransactionType, load_transactions,
};

fn sample() -> Vec<Transaction> {
  vec![
    Transaction::new("W1", "W2", 500.0, "TRANSFER"),
    Transaction::new("W1", "W2", 2000.0, "TRANSFER"),
    Transaction::new("W2", "W3", 100.0, "SWAP"),
    Transaction {
      from: None,
      to: Some("W1".to_string()),
      amount: 50.0,
      transaction_type: TransactionType::Transfer,
    },
  ]
}

#[tokio::test]
async fn refresh_then_render_json() {
  let refresher = GraphRefresher::new(
    StaticTransactionSource::new(sample()),
    RefreshSettings::default(),
  );
  assert_eq!(
    refresher.refresh().await,
    RefreshOutcome::Applied {
      generation: 1,
      nodes: 4,
      links: 3
    }
  );

  let snapshot = refresher.snapshot();
  let mut adapter = JsonSceneAdapter::new(Vec::new());
  adapter
    .render(&Scene::from_snapshot(
      &snapshot,
      SpeedPolicy::Directed,
      NodeSizing::Constant,
    ))
    .unwrap();
  let frame: serde_json::Value = serde_json::from_slice(&adapter.into_inner()).unwrap();

  assert_eq!(frame["generation"], 1);
  let nodes = frame["nodes"].as_array().unwrap();
  assert_eq!(nodes[3]["id"], THIN_AIR);
  assert_eq!(nodes[3]["color"], "red");
  assert_eq!(nodes[2]["color"], "orange");
  assert_eq!(nodes[0]["color"], "pink");
  assert_eq!(nodes[1]["net_volume"], 2500.0 - 100.0);
  let links = frame["links"].as_array().unwrap();
  assert_eq!(links[0]["particle_speed"], 0.006);
  assert_eq!(links[1]["particle_width"], 0.19);
  assert_eq!(links[2]["source"], THIN_AIR);
}

#[test]
fn csv_fixture_matches_json_scenario() {
  let from_csv = load_transactions(Path::new("tests/integration/sample.csv")).unwrap();
  assert_eq!(from_csv, sample());
}

#[test]
fn json_fixture_skips_bad_record() {
  let txs = load_transactions(Path::new("tests/integration/sample_payload.json")).unwrap();
  assert_eq!(txs.len(), 5);
  let graph = walletflow::build(&txs);
  assert_eq!(graph.nodes.len(), 4);
  assert_eq!(graph.links.len(), 3);
}

#[tokio::test]
async fn sum_amounts_widens_repeated_edge() {
  let settings = RefreshSettings {
    window_seconds: 60,
    merge_policy: MergePolicy::SumAmounts,
  };
  let refresher = GraphRefresher::new(StaticTransactionSource::new(sample()), settings);
  refresher.refresh().await;
  let snapshot = refresher.snapshot();
  let scene = Scene::from_snapshot(&snapshot, SpeedPolicy::Directed, NodeSizing::Volume);
  let link = &snapshot.graph.links[0];
  assert_eq!(link.amount_for_width, 2500.0);
  assert!(scene.particle_width(link) > 0.37);
  let w1 = &snapshot.graph.nodes[0];
  assert_eq!(scene.node_role(w1), NodeRole::Both);
  assert_eq!(scene.node_size(w1), (2500.0 + 50.0) * 2.0);
}

#[tokio::test]
async fn watch_loop_publishes_file_changes() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("window.json");
  std::fs::write(&path, r#"{"data":[{"from":"a","to":"b","amount":1}]}"#).unwrap();

  let refresher = Arc::new(GraphRefresher::new(
    FileTransactionSource::new(&path),
    RefreshSettings::default(),
  ));
  let mut updates = refresher.subscribe();
  let (shutdown_tx, shutdown_rx) = watch::channel(false);
  let runner = {
    let refresher = Arc::clone(&refresher);
    tokio::spawn(async move { refresher.run(Duration::from_millis(20), shutdown_rx).await })
  };

  updates.changed().await.unwrap();
  assert_eq!(updates.borrow_and_update().graph.links.len(), 1);

  std::fs::write(
    &path,
    r#"{"data":[{"from":"a","to":"b","amount":1},{"from":"b","to":"c","amount":2}]}"#,
  )
  .unwrap();
  let two_links = tokio::time::timeout(Duration::from_secs(5), async {
    loop {
      updates.changed().await.unwrap();
      if updates.borrow_and_update().graph.links.len() == 2 {
        break;
      }
    }
  })
  .await;
  assert!(two_links.is_ok());

  shutdown_tx.send(true).unwrap();
  runner.await.unwrap();
}
