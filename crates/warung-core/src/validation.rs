//! # Validation Module
//!
//! Input validation for catalog and sale operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP layer, out of scope)                             │
//! │  └── Deserialization / type checks                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                        │
//! │  └── Runs before any file is touched                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store invariants (stock never negative, id uniqueness)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line format has no escaping, so anything that ends up inside a record
//! line (product names, cashier names) must not contain the delimiter
//! characters `|`, `;`, `:` or newlines. That rule lives here so a malformed
//! name can never tear a stored line.

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_NAME_CHARS;

/// Characters that would corrupt the pipe/item encodings.
const FORBIDDEN_CHARS: [char; 5] = ['|', ';', ':', '\n', '\r'];

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
/// - Must not contain `|`, `;`, `:` or newlines
///
/// ## Example
/// ```rust
/// use warung_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Indomie Goreng").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name("Kopi|Susu").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_encodable_text("nama", name, MAX_NAME_CHARS)
}

/// Validates a cashier name. Same encoding rules as product names.
pub fn validate_cashier(cashier: &str) -> ValidationResult<()> {
    validate_encodable_text("kasir", cashier, MAX_NAME_CHARS)
}

fn validate_encodable_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if value.chars().count() > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max: max_chars,
        });
    }

    if value.contains(&FORBIDDEN_CHARS[..]) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must not contain '|', ';', ':' or line breaks",
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Must be strictly positive — free items are not a
/// thing in this catalog.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::MustBePositive { field: "harga" });
    }
    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out), negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stok",
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a requested sale quantity. Must be strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "qty" });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Kopi").is_ok());
        assert!(validate_product_name("Es Teh Manis").is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(101)).is_err());
        assert!(validate_product_name(&"A".repeat(100)).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters_not_bytes() {
        // 100 multibyte characters is still within the limit.
        assert!(validate_product_name(&"é".repeat(100)).is_ok());
        assert!(validate_product_name(&"é".repeat(101)).is_err());
    }

    #[test]
    fn test_delimiters_rejected() {
        for bad in ["Kopi|Susu", "Kopi;Susu", "Kopi:Susu", "Kopi\nSusu"] {
            assert!(
                validate_product_name(bad).is_err(),
                "{bad:?} should be rejected"
            );
            assert!(validate_cashier(bad).is_err());
        }
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(15000).is_ok());
        assert!(validate_price(1).is_ok());
        assert!(validate_price(0).is_err());
        assert!(validate_price(-100).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(20).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
    }
}
