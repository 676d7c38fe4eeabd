//! Input validation and normalisation for ledger and account operations

use crate::contract::{DateRange, InventoryError};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Calendar dates are exchanged as `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted unit price (fits NUMERIC(10, 2))
const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

/// Largest monetary amount whose cents still fit a BIGINT column
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_061_584_302, 21_474_836, 0, false, 0);

const MAX_USERNAME_LEN: usize = 64;

/// Trim a product or item name and reject empty names
pub fn validate_name(field: &str, value: &str) -> Result<String, InventoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

pub fn validate_quantity(field: &str, quantity: i64) -> Result<i64, InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(quantity)
}

/// Reject negative or oversized prices and round to cents
pub fn normalize_price(field: &str, price: Decimal) -> Result<Decimal, InventoryError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(InventoryError::validation(format!(
            "{} cannot be negative",
            field
        )));
    }
    if price > MAX_PRICE {
        return Err(InventoryError::validation(format!(
            "{} exceeds the maximum of {}",
            field, MAX_PRICE
        )));
    }
    Ok(price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// `quantity * unit_price`, failing when the total cannot be stored
pub fn line_total(quantity: i64, unit_price: Decimal) -> Result<Decimal, InventoryError> {
    Decimal::from(quantity)
        .checked_mul(unit_price)
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or_else(|| InventoryError::validation("total amount is too large"))
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InventoryError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        InventoryError::validation(format!(
            "{} '{}' is not a valid date (expected YYYY-MM-DD)",
            field, value
        ))
    })
}

/// Build a range only when both bounds are given; a single bound is ignored
pub fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DateRange>, InventoryError> {
    match (start, end) {
        (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
            let start = parse_date("start", start)?;
            let end = parse_date("end", end)?;
            if start > end {
                return Err(InventoryError::validation(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
            Ok(Some(DateRange::new(start, end)))
        }
        _ => Ok(None),
    }
}

pub fn validate_username(username: &str) -> Result<String, InventoryError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation("Username is required"));
    }
    if trimmed.chars().count() > MAX_USERNAME_LEN {
        return Err(InventoryError::validation(format!(
            "Username cannot be longer than {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(InventoryError::validation("Username cannot contain spaces"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_password(password: &str) -> Result<(), InventoryError> {
    if password.is_empty() {
        return Err(InventoryError::validation("Password is required"));
    }
    Ok(())
}

/// Trim optional free text; blank becomes `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("product_name", "  Paracetamol ").unwrap(), "Paracetamol");
        assert!(validate_name("product_name", "   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("quantity", 5).unwrap(), 5);
        assert!(validate_quantity("quantity", 0).is_err());
        assert!(validate_quantity("quantity", -3).is_err());
    }

    #[test]
    fn test_normalize_price_rounds_to_cents() {
        assert_eq!(normalize_price("unit_price", dec("2.345")).unwrap(), dec("2.35"));
        assert_eq!(normalize_price("unit_price", dec("10")).unwrap(), dec("10"));
        assert_eq!(normalize_price("unit_price", dec("0")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_price_rejects_negative_and_huge() {
        assert!(matches!(
            normalize_price("unit_price", dec("-0.01")),
            Err(InventoryError::Validation { .. })
        ));
        assert!(normalize_price("unit_price", dec("100000000")).is_err());
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(3, dec("2.50")).unwrap(), dec("7.50"));
    }

    #[test]
    fn test_line_total_rejects_amounts_beyond_cents_range() {
        assert_eq!(MAX_AMOUNT, Decimal::from(i64::MAX / 100));
        assert!(line_total(i64::MAX / 100, Decimal::ONE).is_ok());
        assert!(matches!(
            line_total(100_000_000_000_000, dec("99999999")),
            Err(InventoryError::Validation { .. })
        ));
        assert!(matches!(
            line_total(9_000_000_000_000_000_000, dec("99999999")),
            Err(InventoryError::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", "2025-10-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
        );
        assert!(parse_date("date", "01/10/2025").is_err());
        assert!(parse_date("date", "2025-02-30").is_err());
    }

    #[test]
    fn test_parse_date_range_requires_both_bounds() {
        assert_eq!(parse_date_range(Some("2025-10-01"), None).unwrap(), None);
        assert_eq!(parse_date_range(None, None).unwrap(), None);
        let range = parse_date_range(Some("2025-10-01"), Some("2025-10-31"))
            .unwrap()
            .unwrap();
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()));
    }

    #[test]
    fn test_parse_date_range_rejects_inverted() {
        assert!(parse_date_range(Some("2025-10-31"), Some("2025-10-01")).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(" clerk ").unwrap(), "clerk");
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  Jane ".into())), Some("Jane".to_string()));
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(None), None);
    }
}
