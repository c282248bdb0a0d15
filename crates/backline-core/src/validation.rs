//! # Validation Module
//!
//! Input validation for the booking & settlement services.
//!
//! Every service operation validates its input with these helpers before
//! touching any collection; a failed validation means nothing was
//! mutated.

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a band name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use backline_core::validation::validate_band_name;
///
/// assert!(validate_band_name("Los Persas").is_ok());
/// assert!(validate_band_name("   ").is_err());
/// ```
pub fn validate_band_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "band name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "band name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates an amount that must be strictly positive (withdrawals, debt
/// settlements).
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that may be zero but not negative (prices, the
/// register's initial float).
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the partial-collection amount of a debt settlement.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed the amount due
pub fn validate_partial_payment(partial: Money, due: Money) -> ValidationResult<()> {
    validate_non_negative_amount("partial payment", partial)?;

    if partial > due {
        return Err(ValidationError::PartialExceedsDue {
            partial: partial.units(),
            due: due.units(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
