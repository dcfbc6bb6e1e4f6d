//! Tests for `Transaction` and `TransactionType`.

use super::{THIN_AIR, Transaction, TransactionType, parse_amount};

#[test]
fn transfer_type_from_string() {
  assert_eq!(TransactionType::from("TRANSFER"), TransactionType::Transfer);
  assert_eq!(
    TransactionType::from("SWAP"),
    TransactionType::Other("SWAP".to_string())
  );
}

#[test]
fn transfer_type_is_case_sensitive() {
  assert!(!TransactionType::from("transfer").is_transfer());
}

#[test]
fn display_type() {
  assert_eq!(TransactionType::Transfer.to_string(), "TRANSFER");
  assert_eq!(TransactionType::from("MINT").to_string(), "MINT");
  assert_eq!(TransactionType::default().to_string(), "UNKNOWN");
}

#[test]
fn missing_from_reads_as_thin_air() {
  let tx = Transaction {
    from: None,
    to: Some("W2".to_string()),
    amount: 50.0,
    transaction_type: TransactionType::Transfer,
  };
  assert_eq!(tx.source_wallet(), THIN_AIR);
  assert!(tx.connects(THIN_AIR, "W2"));
}

#[test]
fn connects_is_directional() {
  let tx = Transaction::new("W1", "W2", 1.0, "TRANSFER");
  assert!(tx.connects("W1", "W2"));
  assert!(!tx.connects("W2", "W1"));
}

#[test]
fn missing_to_never_connects() {
  let tx = Transaction {
    from: Some("W1".to_string()),
    to: None,
    amount: 1.0,
    transaction_type: TransactionType::Transfer,
  };
  assert_eq!(tx.target_wallet(), None);
  assert!(!tx.connects("W1", ""));
}

#[test]
fn deserialize_amount_in_ic_alias() {
  let json = r#"{"from":"A","to":"B","amount_in_ic":12.5,"transaction_type":"TRANSFER"}"#;
  let tx: Transaction = serde_json::from_str(json).unwrap();
  assert_eq!(tx.amount, 12.5);
  assert!(tx.transaction_type.is_transfer());
}

#[test]
fn deserialize_camel_case_type_and_defaults() {
  let json = r#"{"to":"B","transactionType":"STAKE"}"#;
  let tx: Transaction = serde_json::from_str(json).unwrap();
  assert!(tx.from.is_none());
  assert_eq!(tx.amount, 0.0);
  assert_eq!(tx.transaction_type, TransactionType::Other("STAKE".to_string()));
}

#[test]
fn serialize_type_as_plain_string() {
  let tx = Transaction::new("A", "B", 1.0, "TRANSFER");
  let v = serde_json::to_value(&tx).unwrap();
  assert_eq!(v["transaction_type"], "TRANSFER");
}

#[test]
fn null_and_text_amounts_decode() {
  let null: Transaction = serde_json::from_str(r#"{"from":"A","to":"B","amount":null}"#).unwrap();
  assert_eq!(null.amount, 0.0);
  let text: Transaction =
    serde_json::from_str(r#"{"from":"A","to":"B","amount_in_ic":" 12.5 "}"#).unwrap();
  assert_eq!(text.amount, 12.5);
  let junk: Transaction = serde_json::from_str(r#"{"amount":[1,2]}"#).unwrap();
  assert_eq!(junk.amount, 0.0);
}

#[test]
fn null_type_reads_as_unknown() {
  let tx: Transaction =
    serde_json::from_str(r#"{"from":"A","to":"B","transaction_type":null}"#).unwrap();
  assert_eq!(tx.transaction_type, TransactionType::default());
}

#[test]
fn wallet_ids_decode_leniently() {
  let tx: Transaction = serde_json::from_str(r#"{"from":42,"to":null,"amount":1}"#).unwrap();
  assert_eq!(tx.from.as_deref(), Some("42"));
  assert!(tx.to.is_none());
  assert_eq!(tx.source_wallet(), "42");
}

#[test]
fn amount_text_parsing() {
  assert_eq!(parse_amount("7"), 7.0);
  assert_eq!(parse_amount(""), 0.0);
  assert_eq!(parse_amount("NaN"), 0.0);
  assert_eq!(parse_amount("inf"), 0.0);
  assert_eq!(parse_amount("-3.5"), -3.5);
}
