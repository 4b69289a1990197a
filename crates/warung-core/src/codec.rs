//! # Line Codec
//!
//! The pipe-delimited single-line format behind the two data files.
//!
//! ## File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stok.txt                                                               │
//! │                                                                         │
//! │  id|nama|harga|stok|created_at                    ← header, not data    │
//! │  1|Kopi|15000|20|2026-08-29T09:30:00.000000+00:00                       │
//! │  2|Teh|10000|5|2026-08-29T09:31:12.500000+00:00                         │
//! │                                                                         │
//! │  laporan_penjualan.txt                                                  │
//! │                                                                         │
//! │  id|tanggal|items|total|kasir                     ← header, not data    │
//! │  1|2026-08-29T10:00:00.000000+00:00|1:Kopi:2:30000;2:Teh:1:10000|40000|admin
//! │                └ items: productId:name:qty:subtotal joined by ';'       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decoding Policy
//! Individual decode failures during a bulk read are non-fatal at the store
//! level: the store skips the offending line with a warning and keeps going.
//! Partial corruption must never block the rest of the dataset.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::types::{Product, Transaction, TransactionItem};

/// Field separator for record lines.
const FIELD_SEP: char = '|';
/// Separator between items inside a transaction's items field.
const ITEM_SEP: char = ';';
/// Separator between fields inside one item.
const ITEM_FIELD_SEP: char = ':';

// =============================================================================
// Format Error
// =============================================================================

/// A stored line does not match the expected format.
///
/// Recovered locally during bulk reads (skip + warn); never surfaced to the
/// caller as a hard failure.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Wrong number of pipe-delimited fields for this record kind.
    #[error("invalid {kind} line: expected {expected} fields, got {found}")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// A numeric field did not parse as an integer.
    #[error("invalid integer in field '{field}': '{value}'")]
    Int { field: &'static str, value: String },

    /// A timestamp field did not parse as ISO-8601.
    #[error("invalid timestamp: '{value}'")]
    Timestamp { value: String },
}

// =============================================================================
// LineRecord Trait
// =============================================================================

/// A record kind with a fixed-arity single-line text encoding.
///
/// Implemented by [`Product`] and [`Transaction`]; the stores are written
/// against this trait so the skip-bad-lines read loop exists once.
pub trait LineRecord: Sized {
    /// The literal first line of the data file. Never parsed as data.
    const HEADER: &'static str;

    /// Human-readable record kind for warnings ("product", "transaction").
    const KIND: &'static str;

    /// Store-assigned identifier, used for max+1 allocation and lookups.
    fn id(&self) -> i64;

    /// Encodes the record as one newline-free line.
    fn to_line(&self) -> String;

    /// Decodes one line, failing with [`FormatError`] on any mismatch.
    fn from_line(line: &str) -> Result<Self, FormatError>;
}

// =============================================================================
// Timestamp Encoding
// =============================================================================

/// Encodes a timestamp at microsecond precision.
///
/// Stores truncate to microseconds when stamping, so encode/decode is exact
/// for every record that ever hits disk.
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts both RFC 3339 (what this codec writes) and the zone-less form the
/// pre-rewrite system wrote (`2026-08-29T10:00:00.123456`), which is read as
/// UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, FormatError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| FormatError::Timestamp {
            value: value.to_string(),
        })
}

fn parse_i64(field: &'static str, value: &str) -> Result<i64, FormatError> {
    value.parse().map_err(|_| FormatError::Int {
        field,
        value: value.to_string(),
    })
}

// =============================================================================
// Product Lines
// =============================================================================

impl LineRecord for Product {
    const HEADER: &'static str = "id|nama|harga|stok|created_at";
    const KIND: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.id,
            self.name,
            self.price,
            self.stock,
            encode_timestamp(self.created_at)
        )
    }

    fn from_line(line: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = line.trim().split(FIELD_SEP).collect();
        if parts.len() != 5 {
            return Err(FormatError::FieldCount {
                kind: Self::KIND,
                expected: 5,
                found: parts.len(),
            });
        }

        Ok(Product {
            id: parse_i64("id", parts[0])?,
            name: parts[1].to_string(),
            price: parse_i64("harga", parts[2])?,
            stock: parse_i64("stok", parts[3])?,
            created_at: parse_timestamp(parts[4])?,
        })
    }
}

// =============================================================================
// Transaction Lines
// =============================================================================

impl TransactionItem {
    fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.product_id, self.name, self.qty, self.subtotal
        )
    }

    fn decode(s: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = s.split(ITEM_FIELD_SEP).collect();
        if parts.len() != 4 {
            return Err(FormatError::FieldCount {
                kind: "transaction item",
                expected: 4,
                found: parts.len(),
            });
        }

        Ok(TransactionItem {
            product_id: parse_i64("product_id", parts[0])?,
            name: parts[1].to_string(),
            qty: parse_i64("qty", parts[2])?,
            subtotal: parse_i64("subtotal", parts[3])?,
        })
    }
}

impl LineRecord for Transaction {
    const HEADER: &'static str = "id|tanggal|items|total|kasir";
    const KIND: &'static str = "transaction";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_line(&self) -> String {
        let items: Vec<String> = self.items.iter().map(TransactionItem::encode).collect();
        format!(
            "{}|{}|{}|{}|{}",
            self.id,
            encode_timestamp(self.timestamp),
            items.join(&ITEM_SEP.to_string()),
            self.total,
            self.cashier
        )
    }

    fn from_line(line: &str) -> Result<Self, FormatError> {
        let parts: Vec<&str> = line.trim().split(FIELD_SEP).collect();
        if parts.len() != 5 {
            return Err(FormatError::FieldCount {
                kind: Self::KIND,
                expected: 5,
                found: parts.len(),
            });
        }

        // An empty items field decodes to an empty sequence.
        let items = if parts[2].is_empty() {
            Vec::new()
        } else {
            parts[2]
                .split(ITEM_SEP)
                .map(TransactionItem::decode)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Transaction {
            id: parse_i64("id", parts[0])?,
            timestamp: parse_timestamp(parts[1])?,
            items,
            total: parse_i64("total", parts[3])?,
            cashier: parts[4].to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn micros_ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap()
            + chrono::Duration::microseconds(123_456)
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            id: 7,
            timestamp: micros_ts(),
            items: vec![
                TransactionItem {
                    product_id: 1,
                    name: "Kopi".to_string(),
                    qty: 2,
                    subtotal: 30000,
                },
                TransactionItem {
                    product_id: 2,
                    name: "Teh".to_string(),
                    qty: 1,
                    subtotal: 10000,
                },
            ],
            total: 40000,
            cashier: "admin".to_string(),
        }
    }

    #[test]
    fn test_product_round_trip() {
        let product = Product {
            id: 3,
            name: "Indomie Goreng".to_string(),
            price: 3500,
            stock: 48,
            created_at: micros_ts(),
        };

        let decoded = Product::from_line(&product.to_line()).unwrap();
        assert_eq!(decoded, product);
    }

    #[test]
    fn test_transaction_round_trip() {
        let trx = sample_transaction();
        let decoded = Transaction::from_line(&trx.to_line()).unwrap();
        assert_eq!(decoded, trx);
    }

    #[test]
    fn test_transaction_line_shape() {
        let line = sample_transaction().to_line();
        assert_eq!(
            line,
            "7|2026-08-29T10:00:00.123456+00:00|1:Kopi:2:30000;2:Teh:1:10000|40000|admin"
        );
    }

    #[test]
    fn test_empty_items_field_decodes_to_empty_vec() {
        let trx =
            Transaction::from_line("1|2026-08-29T10:00:00.000000+00:00||0|admin").unwrap();
        assert!(trx.items.is_empty());
        assert_eq!(trx.total, 0);
    }

    #[test]
    fn test_wrong_arity_is_format_error() {
        let err = Product::from_line("1|Kopi|15000").unwrap_err();
        assert!(matches!(
            err,
            FormatError::FieldCount {
                expected: 5,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_integer_is_format_error() {
        let err =
            Product::from_line("x|Kopi|15000|20|2026-08-29T10:00:00.000000+00:00").unwrap_err();
        assert!(matches!(err, FormatError::Int { field: "id", .. }));
    }

    #[test]
    fn test_parses_legacy_naive_timestamp_as_utc() {
        // Files written before the rewrite carry zone-less local isoformat.
        let product = Product::from_line("1|Kopi|15000|20|2026-08-29T10:00:00.123456").unwrap();
        assert_eq!(product.created_at, micros_ts());
    }

    #[test]
    fn test_bad_timestamp_is_format_error() {
        let err = Product::from_line("1|Kopi|15000|20|yesterday").unwrap_err();
        assert!(matches!(err, FormatError::Timestamp { .. }));
    }
}
