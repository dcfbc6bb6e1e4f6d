//! A wallet-to-wallet transaction record as supplied by the transaction source.

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque wallet identifier. Equality is exact string equality.
pub type WalletId = String;

/// Placeholder wallet used when a transaction has no origin.
pub const THIN_AIR: &str = "Thin Air";

/// Type tag used when a record carries no transaction type.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

/// Kind of transaction. Only `TRANSFER` is distinguished; everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
  Transfer,
  Other(String),
}

impl TransactionType {
  pub fn is_transfer(&self) -> bool {
    matches!(self, TransactionType::Transfer)
  }
}

impl Default for TransactionType {
  fn default() -> Self {
    TransactionType::Other(UNKNOWN_TYPE.to_string())
  }
}

impl From<String> for TransactionType {
  fn from(s: String) -> Self {
    if s == "TRANSFER" {
      TransactionType::Transfer
    } else {
      TransactionType::Other(s)
    }
  }
}

impl From<&str> for TransactionType {
  fn from(s: &str) -> Self {
    TransactionType::from(s.to_string())
  }
}

impl From<TransactionType> for String {
  fn from(t: TransactionType) -> Self {
    t.to_string()
  }
}

impl fmt::Display for TransactionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TransactionType::Transfer => write!(f, "TRANSFER"),
      TransactionType::Other(s) => write!(f, "{}", s),
    }
  }
}

/// One transfer between two wallets.
///
/// `from` and `to` are optional on the wire. A missing `from` is read as [THIN_AIR]; a
/// missing `to` means the record contributes a node but no edge.
///
/// Decoding never rejects an object: a `null` or unreadable amount is 0, a numeric string
/// amount is parsed, a non-string type is `UNKNOWN` and a non-string wallet id is absent
/// (integers are kept as their decimal form).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
  #[serde(default, deserialize_with = "lenient_wallet")]
  pub from: Option<WalletId>,
  #[serde(default, deserialize_with = "lenient_wallet")]
  pub to: Option<WalletId>,
  #[serde(default, alias = "amount_in_ic", deserialize_with = "lenient_amount")]
  pub amount: f64,
  #[serde(default, alias = "transactionType", deserialize_with = "lenient_type")]
  pub transaction_type: TransactionType,
}

/// Parses an amount written as text. Blank, unparseable or non-finite text is 0.
pub fn parse_amount(text: &str) -> f64 {
  text
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .unwrap_or(0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
  Number(f64),
  Text(String),
  Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
  Text(String),
  Int(i64),
  Other(IgnoredAny),
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
  Ok(match LooseScalar::deserialize(d)? {
    LooseScalar::Number(n) => n,
    LooseScalar::Text(s) => parse_amount(&s),
    LooseScalar::Other(_) => 0.0,
  })
}

fn lenient_type<'de, D: Deserializer<'de>>(d: D) -> Result<TransactionType, D::Error> {
  Ok(match LooseScalar::deserialize(d)? {
    LooseScalar::Text(s) => TransactionType::from(s),
    _ => TransactionType::default(),
  })
}

fn lenient_wallet<'de, D: Deserializer<'de>>(d: D) -> Result<Option<WalletId>, D::Error> {
  Ok(match LooseId::deserialize(d)? {
    LooseId::Text(s) => Some(s),
    LooseId::Int(n) => Some(n.to_string()),
    LooseId::Other(_) => None,
  })
}

impl Transaction {
  pub fn new(
    from: impl Into<WalletId>,
    to: impl Into<WalletId>,
    amount: f64,
    transaction_type: impl Into<TransactionType>,
  ) -> Self {
    Self {
      from: Some(from.into()),
      to: Some(to.into()),
      amount,
      transaction_type: transaction_type.into(),
    }
  }

  /// Sending wallet, with the sentinel substituted when absent.
  pub fn source_wallet(&self) -> &str {
    self.from.as_deref().unwrap_or(THIN_AIR)
  }

  /// Receiving wallet, if present.
  pub fn target_wallet(&self) -> Option<&str> {
    self.to.as_deref()
  }

  /// True when this record goes from `source` to `target` (sentinel-aware).
  pub fn connects(&self, source: &str, target: &str) -> bool {
    self.source_wallet() == source && self.target_wallet() == Some(target)
  }
}
