//! Transaction sources: where the transaction sequence for a time window comes from.
//!
//! [TransactionSource::fetch] never fails. Network, I/O and parse failures are logged and
//! turned into an empty sequence, which builds to an empty (but renderable) graph.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, GraphResult};
use crate::types::{Transaction, TransactionType, parse_amount};

/// Query parameter carrying the window length in seconds.
pub const DURATION_PARAM: &str = "duration";

/// Supplies the transactions of the last `window_seconds`.
#[async_trait]
pub trait TransactionSource: Send + Sync {
  async fn fetch(&self, window_seconds: u64) -> Vec<Transaction>;
}

#[async_trait]
impl<T: TransactionSource + ?Sized> TransactionSource for Box<T> {
  async fn fetch(&self, window_seconds: u64) -> Vec<Transaction> {
    (**self).fetch(window_seconds).await
  }
}

/// Decodes each record on its own. Any JSON object decodes (loose fields fall back to
/// defaults); records that are not objects are skipped.
pub fn parse_records(records: Vec<Value>) -> Vec<Transaction> {
  let total = records.len();
  let parsed: Vec<Transaction> = records
    .into_iter()
    .enumerate()
    .filter_map(|(i, record)| {
      if !record.is_object() {
        warn!(record = i, "skipping transaction record that is not an object");
        return None;
      }
      match serde_json::from_value(record) {
        Ok(tx) => Some(tx),
        Err(e) => {
          warn!(record = i, error = %e, "skipping malformed transaction record");
          None
        }
      }
    })
    .collect();
  if parsed.len() < total {
    debug!(kept = parsed.len(), total, "dropped malformed records");
  }
  parsed
}

/// Pulls the record array out of a payload: `{"data": [...]}` or a bare array.
fn payload_records(payload: Value) -> Option<Vec<Value>> {
  match payload {
    Value::Array(records) => Some(records),
    Value::Object(mut map) => match map.remove("data") {
      Some(Value::Array(records)) => Some(records),
      _ => None,
    },
    _ => None,
  }
}

/// Parses a JSON payload strictly: invalid JSON or a missing record array is an error.
pub fn try_parse_payload(bytes: &[u8]) -> GraphResult<Vec<Transaction>> {
  let payload: Value = serde_json::from_slice(bytes)?;
  payload_records(payload)
    .map(parse_records)
    .ok_or_else(|| GraphError::UnsupportedPayload("expected a `data` array".to_string()))
}

/// Parses a JSON payload, yielding an empty sequence on any failure.
pub fn parse_payload(bytes: &[u8]) -> Vec<Transaction> {
  try_parse_payload(bytes).unwrap_or_else(|e| {
    warn!(error = %e, "unusable transaction payload");
    Vec::new()
  })
}

/// One CSV row; every column is optional and the amount is read leniently.
#[derive(Debug, Deserialize)]
struct CsvRecord {
  from: Option<String>,
  to: Option<String>,
  #[serde(alias = "amount_in_ic")]
  amount: Option<String>,
  #[serde(alias = "transactionType")]
  transaction_type: Option<String>,
}

impl From<CsvRecord> for Transaction {
  fn from(r: CsvRecord) -> Self {
    Transaction {
      from: r.from,
      to: r.to,
      amount: r.amount.as_deref().map_or(0.0, parse_amount),
      transaction_type: r
        .transaction_type
        .map(TransactionType::from)
        .unwrap_or_default(),
    }
  }
}

/// Parses CSV with a header row (`from,to,amount,transaction_type`). Rows the reader cannot
/// split (e.g. wrong field count) are skipped.
pub fn parse_csv(bytes: &[u8]) -> GraphResult<Vec<Transaction>> {
  let mut reader = csv::Reader::from_reader(bytes);
  // Fail on an unreadable header; individual rows are skipped below.
  reader.headers()?;
  let mut out = Vec::new();
  for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
    match row {
      Ok(r) => out.push(r.into()),
      Err(e) => warn!(row = i + 1, error = %e, "skipping malformed CSV row"),
    }
  }
  Ok(out)
}

/// Loads transactions from a `.csv` file or a JSON payload file.
#[instrument(level = "trace")]
pub fn load_transactions(path: &Path) -> GraphResult<Vec<Transaction>> {
  let bytes = std::fs::read(path)?;
  let is_csv = path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
  if is_csv {
    parse_csv(&bytes)
  } else {
    try_parse_payload(&bytes)
  }
}

/// Fetches from an analytics endpoint: `GET {endpoint}?duration={window_seconds}`.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
  client: reqwest::Client,
  endpoint: Url,
}

impl HttpTransactionSource {
  pub fn new(endpoint: &str, timeout: Duration) -> GraphResult<Self> {
    let endpoint = Url::parse(endpoint).map_err(|e| GraphError::InvalidEndpoint {
      endpoint: endpoint.to_string(),
      reason: e.to_string(),
    })?;
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self { client, endpoint })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }

  pub fn request_url(&self, window_seconds: u64) -> Url {
    let mut url = self.endpoint.clone();
    url
      .query_pairs_mut()
      .append_pair(DURATION_PARAM, &window_seconds.to_string());
    url
  }

  async fn try_fetch(&self, window_seconds: u64) -> Result<Vec<Transaction>, reqwest::Error> {
    let response = self
      .client
      .get(self.request_url(window_seconds))
      .send()
      .await?
      .error_for_status()?;
    let body = response.bytes().await?;
    Ok(parse_payload(&body))
  }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
  #[instrument(level = "debug", skip(self), fields(endpoint = %self.endpoint))]
  async fn fetch(&self, window_seconds: u64) -> Vec<Transaction> {
    match self.try_fetch(window_seconds).await {
      Ok(txs) => {
        debug!(transactions = txs.len(), "fetched transactions");
        txs
      }
      Err(e) => {
        warn!(error = %e, "transaction fetch failed, using empty set");
        Vec::new()
      }
    }
  }
}

/// Re-reads a JSON or CSV file on every fetch. The window is ignored.
#[derive(Debug, Clone)]
pub struct FileTransactionSource {
  path: PathBuf,
}

impl FileTransactionSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

#[async_trait]
impl TransactionSource for FileTransactionSource {
  async fn fetch(&self, _window_seconds: u64) -> Vec<Transaction> {
    let path = self.path.clone();
    let loaded = tokio::task::spawn_blocking(move || load_transactions(&path)).await;
    match loaded {
      Ok(Ok(txs)) => txs,
      Ok(Err(e)) => {
        warn!(path = %self.path.display(), error = %e, "could not load transactions");
        Vec::new()
      }
      Err(e) => {
        warn!(error = %e, "transaction loader task failed");
        Vec::new()
      }
    }
  }
}

/// Fixed in-memory transactions.
#[derive(Debug, Clone, Default)]
pub struct StaticTransactionSource {
  transactions: Vec<Transaction>,
}

impl StaticTransactionSource {
  pub fn new(transactions: Vec<Transaction>) -> Self {
    Self { transactions }
  }
}

#[async_trait]
impl TransactionSource for StaticTransactionSource {
  async fn fetch(&self, _window_seconds: u64) -> Vec<Transaction> {
    self.transactions.clone()
  }
}
