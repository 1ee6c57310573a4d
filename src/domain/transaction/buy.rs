//! Marketplace purchase transactions.
use crate::models::RelayError;

/// Parses a listing price in SOL.
pub fn parse_price(price: &str) -> Result<f64, RelayError> {
    let value: f64 = price
        .trim()
        .parse()
        .map_err(|e| RelayError::Validation(format!("Invalid price {price}: {e}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(RelayError::Validation(format!(
            "Price must be a positive number, got {price}"
        )));
    }
    Ok(value)
}
