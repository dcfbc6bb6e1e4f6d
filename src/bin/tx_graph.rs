//! CLI: render a window of wallet transactions as force-graph scene frames (JSON).
//!
//! Fetches `GET {endpoint}?duration={window}` (or reads `--input`), builds the wallet graph
//! and prints one evaluated frame per snapshot. With `--watch` it keeps refreshing until
//! Ctrl-C; a slower, older fetch never overwrites a newer one.
//!
//! Usage: `tx_graph [OPTIONS]`
//! Example: tx_graph --input tests/integration/sample_payload.json --pretty
//!
//! Set RUST_LOG=walletflow=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use walletflow::source::TransactionSource;
use walletflow::{
  FileTransactionSource, GraphConfig, GraphRefresher, GraphSnapshot, HttpTransactionSource,
  JsonSceneAdapter, MergePolicy, NodeSizing, RenderAdapter, Scene, SpeedPolicy, load_config,
  load_transactions,
};

/// Render wallet transactions as force-graph scene frames.
#[derive(Parser, Debug)]
#[command(name = "tx_graph")]
#[command(
  after_help = r#"Environment variables (override --endpoint and --window when set):
  TXGRAPH_ENDPOINT   Analytics endpoint queried with ?duration=<window>.
  TXGRAPH_WINDOW     Window length in seconds.

Examples:
  tx_graph --endpoint http://localhost:8080/analytics/transactions --window 300
  tx_graph --input window.csv --speed-policy undirected --pretty
  tx_graph --config txgraph.json --watch"#
)]
struct Args {
  /// JSON config file. Flags override its values.
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Analytics endpoint. Overridden by TXGRAPH_ENDPOINT if set.
  #[arg(long, value_name = "URL")]
  endpoint: Option<String>,

  /// Window length in seconds. Overridden by TXGRAPH_WINDOW if set.
  #[arg(long, value_name = "SECS")]
  window: Option<u64>,

  /// Read transactions from a JSON payload or .csv file instead of the endpoint.
  #[arg(long, value_name = "FILE")]
  input: Option<PathBuf>,

  #[arg(long, value_enum)]
  speed_policy: Option<SpeedPolicy>,

  #[arg(long, value_enum)]
  merge_policy: Option<MergePolicy>,

  /// Size nodes by total volume instead of a constant size.
  #[arg(long)]
  size_by_volume: bool,

  /// Keep refreshing every refresh_interval_secs and print a frame per snapshot.
  #[arg(long)]
  watch: bool,

  /// Write frames here instead of stdout.
  #[arg(long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Pretty-print frames.
  #[arg(long)]
  pretty: bool,
}

fn resolve_config(args: &Args) -> GraphConfig {
  let mut config = match &args.config {
    Some(path) => match load_config(path) {
      Ok(c) => c,
      Err(e) => {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
      }
    },
    None => GraphConfig::default(),
  };
  if let Some(endpoint) = &args.endpoint {
    config.endpoint = endpoint.clone();
  }
  if let Some(window) = args.window {
    config.window_seconds = window;
  }
  if let Some(policy) = args.speed_policy {
    config.speed_policy = policy;
  }
  if let Some(policy) = args.merge_policy {
    config.merge_policy = policy;
  }
  if args.size_by_volume {
    config.node_sizing = NodeSizing::Volume;
  }
  // Env vars override flags.
  config.apply_env(|key| env::var(key).ok());
  config
}

fn http_source(config: &GraphConfig) -> HttpTransactionSource {
  match HttpTransactionSource::new(&config.endpoint, config.timeout()) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  }
}

fn render_or_exit<W: Write>(adapter: &mut JsonSceneAdapter<W>, scene: &Scene<'_>) {
  if let Err(e) = adapter.render(scene) {
    eprintln!("Error writing frame: {}", e);
    process::exit(1);
  }
}

async fn run_once<W: Write>(args: &Args, config: &GraphConfig, adapter: &mut JsonSceneAdapter<W>) {
  let transactions = match &args.input {
    Some(path) => match load_transactions(path) {
      Ok(txs) => txs,
      Err(e) => {
        eprintln!("Error reading {}: {}", path.display(), e);
        process::exit(1);
      }
    },
    None => http_source(config).fetch(config.window_seconds).await,
  };
  let snapshot = GraphSnapshot::build(
    1,
    config.window_seconds,
    transactions,
    &config.merge_policy,
  );
  info!(
    nodes = snapshot.graph.nodes.len(),
    links = snapshot.graph.links.len(),
    "graph built"
  );
  let scene = Scene::from_snapshot(&snapshot, config.speed_policy, config.node_sizing);
  render_or_exit(adapter, &scene);
}

async fn run_watch<W: Write>(args: &Args, config: &GraphConfig, adapter: &mut JsonSceneAdapter<W>) {
  let source: Box<dyn TransactionSource> = match &args.input {
    Some(path) => Box::new(FileTransactionSource::new(path)),
    None => Box::new(http_source(config)),
  };
  let refresher = Arc::new(GraphRefresher::new(source, config.refresh_settings()));
  let mut updates = refresher.subscribe();
  let (shutdown_tx, shutdown_rx) = watch::channel(false);

  let runner = {
    let refresher = Arc::clone(&refresher);
    let every = config.refresh_interval();
    tokio::spawn(async move { refresher.run(every, shutdown_rx).await })
  };

  let ctrl_c = tokio::signal::ctrl_c();
  tokio::pin!(ctrl_c);
  loop {
    tokio::select! {
      changed = updates.changed() => {
        if changed.is_err() {
          break;
        }
        let snapshot = updates.borrow_and_update().clone();
        let scene = Scene::from_snapshot(&snapshot, config.speed_policy, config.node_sizing);
        render_or_exit(adapter, &scene);
      }
      _ = &mut ctrl_c => {
        info!("interrupted");
        break;
      }
    }
  }

  let _ = shutdown_tx.send(true);
  if let Err(e) = runner.await {
    eprintln!("Refresh loop error: {}", e);
    process::exit(1);
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(io::stderr)
    .init();

  info!("tx_graph starting");
  let args = Args::parse();
  let config = resolve_config(&args);
  info!(
    endpoint = %config.endpoint,
    window_seconds = config.window_seconds,
    input = ?args.input,
    watch = args.watch,
    "options (env, flags or config)"
  );

  let writer: Box<dyn Write> = match &args.output {
    Some(path) => match File::create(path) {
      Ok(f) => Box::new(f),
      Err(e) => {
        eprintln!("Error creating {}: {}", path.display(), e);
        process::exit(1);
      }
    },
    None => Box::new(io::stdout()),
  };
  let mut adapter = JsonSceneAdapter::new(writer);
  if args.pretty {
    adapter = adapter.pretty();
  }

  if args.watch {
    run_watch(&args, &config, &mut adapter).await;
  } else {
    run_once(&args, &config, &mut adapter).await;
  }
}
